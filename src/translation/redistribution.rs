/*!
 * Proportional redistribution of translated text across runs.
 *
 * A paragraph is translated as one string, but its formatting lives on
 * the individual runs. The translation is cut back into as many pieces
 * as there were runs, each piece sized by the share of characters the
 * run held in the original. Cuts snap forward to a nearby space so
 * words are not split when it can be avoided.
 *
 * The mapping is character-count based, not a word alignment: the run
 * count and order are always preserved, the exact phrase boundaries
 * are not.
 */

/// How far past a proportional cut to look for a space
pub const SPACE_LOOKAHEAD: usize = 10;

/// Split `translated` into `original.len()` pieces proportional to the
/// character lengths of `original`.
///
/// - An empty `original` yields an empty vector.
/// - When every original piece is empty, the whole translation goes to
///   the first piece and the rest stay empty.
/// - The last piece receives whatever remains after the earlier cuts.
pub fn redistribute<S: AsRef<str>>(original: &[S], translated: &str) -> Vec<String> {
    if original.is_empty() {
        return Vec::new();
    }

    let lengths: Vec<usize> = original
        .iter()
        .map(|fragment| fragment.as_ref().chars().count())
        .collect();
    let total: usize = lengths.iter().sum();

    if total == 0 {
        let mut pieces = vec![String::new(); original.len()];
        pieces[0] = translated.to_string();
        return pieces;
    }

    let chars: Vec<char> = translated.chars().collect();
    let translated_len = chars.len();
    let last = original.len() - 1;

    let mut pieces = Vec::with_capacity(original.len());
    let mut position = 0;

    for (index, length) in lengths.iter().enumerate() {
        if index == last {
            pieces.push(chars[position..].iter().collect());
            break;
        }

        // floor(translated_len * length / total), kept in integers
        let share = translated_len * length / total;
        let mut end = (position + share).min(translated_len);

        if end < translated_len {
            let window_end = (end + SPACE_LOOKAHEAD).min(translated_len);
            if let Some(offset) = chars[end..window_end].iter().position(|c| *c == ' ') {
                end += offset + 1;
            }
        }

        pieces.push(chars[position..end].iter().collect());
        position = end;
    }

    pieces
}
