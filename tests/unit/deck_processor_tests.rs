/*!
 * Tests for the shape tree walker
 */

use std::sync::Arc;

use slidelingo::deck_processor::{DeckProcessor, ProcessingStats};
use slidelingo::document::{Deck, Paragraph, Run, Shape, ShapeKind, Slide, TextFrame};
use crate::common::doubles::{boxed, broken_shape, broken_table, BrokenNotesSlide, BrokenSlide, MixedDeck, MixedSlide};
use crate::common::{self, RecordingTranslator};

fn single_slide(shapes: Vec<Shape>) -> Deck {
    Deck::new(vec![Slide::new(1, shapes)])
}

fn title_frame(deck: &Deck) -> &TextFrame {
    deck.slides[0].shapes[0].text_frame().unwrap()
}

#[tokio::test]
async fn test_process_withTwoRunParagraph_shouldRedistributeAndKeepFormatting() {
    let translator = RecordingTranslator::with_pairs([("Red House", "Casa Roja")]);
    let mut deck = single_slide(vec![Shape::text_box(
        2,
        "Title 1",
        TextFrame::from_paragraphs(vec![Paragraph::from_runs(vec![
            Run::colored("Red ", "C00000"),
            Run::bold("House"),
        ])]),
    )]);

    let stats = DeckProcessor::new(translator.clone()).process(&mut deck).await;

    let runs = &title_frame(&deck).paragraphs[0].runs;
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].text, "Casa ");
    assert_eq!(runs[1].text, "Roja");
    assert_eq!(runs[0].format.color.as_deref(), Some("C00000"));
    assert!(runs[1].format.bold);

    assert_eq!(translator.calls(), vec!["Red House"]);
    assert_eq!(stats.text_runs_translated, 2);
    assert_eq!(stats.shapes_processed, 1);
    assert_eq!(stats.slides_processed, 1);
    assert!(stats.errors.is_empty());
}

#[tokio::test]
async fn test_process_withUnchangedTranslation_shouldNotTouchRuns() {
    let translator = RecordingTranslator::with_pairs(Vec::<(String, String)>::new());
    let mut deck = single_slide(vec![Shape::text_box(2, "Title", TextFrame::from_paragraphs(vec![
        Paragraph::from_runs(vec![Run::new("Hello "), Run::bold("world")]),
    ]))]);
    let before = deck.clone();

    let stats = DeckProcessor::new(translator.clone()).process(&mut deck).await;

    assert_eq!(deck, before);
    assert_eq!(stats.text_runs_translated, 0);
    assert_eq!(translator.calls(), vec!["Hello world"]);
}

#[tokio::test]
async fn test_process_shouldTranslateEachParagraphOnce() {
    let translator = RecordingTranslator::with_pairs([("First", "Prvi"), ("Second", "Drugi")]);
    let mut deck = single_slide(vec![Shape::text_box(2, "Body", TextFrame::from_text("First\nSecond"))]);

    let stats = DeckProcessor::new(translator.clone()).process(&mut deck).await;

    assert_eq!(translator.calls(), vec!["First", "Second"]);
    assert_eq!(title_frame(&deck).text(), "Prvi\nDrugi");
    assert_eq!(stats.text_runs_translated, 2);
}

#[tokio::test]
async fn test_process_withEmptyParagraph_shouldNotCallTranslator() {
    let translator = RecordingTranslator::with_pairs([("x", "y")]);
    let mut deck = single_slide(vec![Shape::text_box(2, "Empty", TextFrame::from_paragraphs(vec![
        Paragraph::from_runs(Vec::new()),
    ]))]);

    let stats = DeckProcessor::new(translator.clone()).process(&mut deck).await;

    assert!(translator.calls().is_empty());
    assert_eq!(stats.shapes_processed, 1);
}

#[tokio::test]
async fn test_process_withTable_shouldVisitCellsRowMajorAndCountTable() {
    let translator = RecordingTranslator::with_pairs([("Name", "Ime"), ("Price", "Cena"), ("Apple", "Jabolko")]);
    let mut deck = single_slide(vec![Shape::table(3, "Table", vec![vec!["Name", "Price"], vec!["Apple", "12"]])]);

    let stats = DeckProcessor::new(translator.clone()).process(&mut deck).await;

    assert_eq!(translator.calls(), vec!["Name", "Price", "Apple", "12"]);
    assert_eq!(common::table_texts(&deck.slides[0].shapes[0]), vec!["Ime", "Cena", "Jabolko", "12"]);
    assert_eq!(stats.tables_processed, 1);
    assert_eq!(stats.shapes_processed, 0);
    assert_eq!(stats.text_runs_translated, 3);
}

#[tokio::test]
async fn test_process_withNestedGroups_shouldTranslateInPlace() {
    let translator = RecordingTranslator::with_pairs([("Good morning", "Dobro jutro"), ("Thank you", "Hvala")]);
    let mut deck = single_slide(vec![Shape::group(10, "Outer", vec![
        Shape::text_box(11, "Caption", TextFrame::from_text("Good morning")),
        Shape::group(12, "Inner", vec![Shape::text_box(13, "Label", TextFrame::from_text("Thank you"))]),
    ])]);

    let ids_before = deck.shape_ids();
    let inner_before: *const Shape = &deck.slides[0].shapes[0].children()[1].children()[0];

    let stats = DeckProcessor::new(translator).process(&mut deck).await;

    let inner_after: *const Shape = &deck.slides[0].shapes[0].children()[1].children()[0];
    assert!(std::ptr::eq(inner_before, inner_after));
    assert_eq!(deck.shape_ids(), ids_before);

    let outer = &deck.slides[0].shapes[0];
    assert_eq!(outer.children()[0].text_frame().unwrap().text(), "Dobro jutro");
    assert_eq!(outer.children()[1].children()[0].text_frame().unwrap().text(), "Hvala");

    assert_eq!(stats.groups_traversed, 2);
    assert_eq!(stats.shapes_processed, 2);
}

#[tokio::test]
async fn test_process_withTableAndGroupInsideGroup_shouldVisitEachOnceInPlace() {
    let translator = RecordingTranslator::with_pairs([
        ("Name", "Ime"),
        ("Price", "Cena"),
        ("Apple", "Jabolko"),
        ("Thank you", "Hvala"),
    ]);
    let mut deck = single_slide(vec![Shape::group(10, "Outer", vec![
        Shape::table(11, "Prices", vec![vec!["Name", "Price"], vec!["Apple", "12"]]),
        Shape::group(12, "Inner", vec![Shape::text_box(13, "Label", TextFrame::from_text("Thank you"))]),
    ])]);

    let ids_before = deck.shape_ids();
    let table_before: *const Shape = &deck.slides[0].shapes[0].children()[0];
    let inner_before: *const Shape = &deck.slides[0].shapes[0].children()[1];

    let stats = DeckProcessor::new(translator.clone()).process(&mut deck).await;

    let outer = &deck.slides[0].shapes[0];
    assert!(std::ptr::eq(table_before, &outer.children()[0]));
    assert!(std::ptr::eq(inner_before, &outer.children()[1]));
    assert_eq!(deck.shape_ids(), ids_before);

    assert_eq!(translator.calls(), vec!["Name", "Price", "Apple", "12", "Thank you"]);
    assert_eq!(common::table_texts(&outer.children()[0]), vec!["Ime", "Cena", "Jabolko", "12"]);
    assert_eq!(outer.children()[1].children()[0].text_frame().unwrap().text(), "Hvala");

    assert_eq!(stats.tables_processed, 1);
    assert_eq!(stats.groups_traversed, 2);
    assert_eq!(stats.shapes_processed, 1);
    assert_eq!(stats.text_runs_translated, 4);
    assert!(stats.errors.is_empty());
}

#[tokio::test]
async fn test_process_withNotes_shouldTranslateThemAfterShapes() {
    let translator = RecordingTranslator::with_pairs([("Title", "Naslov"), ("Remember to smile", "Nasmej se")]);
    let mut deck = Deck::new(vec![
        Slide::new(1, vec![Shape::text_box(2, "Title", TextFrame::from_text("Title"))])
            .with_notes(TextFrame::from_text("Remember to smile")),
    ]);

    let stats = DeckProcessor::new(translator.clone()).process(&mut deck).await;

    assert_eq!(translator.calls(), vec!["Title", "Remember to smile"]);
    assert_eq!(deck.slides[0].notes.as_ref().unwrap().text(), "Nasmej se");
    assert_eq!(stats.notes_translated, 1);
}

#[tokio::test]
async fn test_process_withPicture_shouldCountShapeWithoutTranslating() {
    let translator = RecordingTranslator::with_pairs([("x", "y")]);
    let mut deck = single_slide(vec![Shape::picture(4, "Logo")]);

    let stats = DeckProcessor::new(translator.clone()).process(&mut deck).await;

    assert!(translator.calls().is_empty());
    assert_eq!(stats.shapes_processed, 1);
    assert!(matches!(deck.slides[0].shapes[0].kind, ShapeKind::Picture { .. }));
}

#[tokio::test]
async fn test_process_withBrokenThirdSlide_shouldProcessTheOthers() {
    let translator = RecordingTranslator::with_pairs([("Hello", "Zdravo")]);
    let mut slides: Vec<Box<dyn slidelingo::document::SlideNode>> = Vec::new();
    for index in 1..=5 {
        if index == 3 {
            slides.push(Box::new(BrokenSlide));
        } else {
            slides.push(Box::new(Slide::new(index, vec![Shape::text_box(index * 10, "Text", TextFrame::from_text("Hello"))])));
        }
    }
    let mut deck = MixedDeck { slides };

    let stats = DeckProcessor::new(translator.clone()).process(&mut deck).await;

    assert_eq!(stats.slides_processed, 4);
    assert_eq!(stats.shapes_processed, 4);
    assert_eq!(stats.errors.len(), 1);
    assert!(stats.errors[0].contains("slide 3"));
    assert_eq!(translator.calls().len(), 4);
}

#[tokio::test]
async fn test_process_withBrokenShape_shouldContinueWithSiblings() {
    let translator = RecordingTranslator::with_pairs([("Before", "Prej"), ("After", "Potem")]);
    let mut deck = MixedDeck::single(MixedSlide {
        shapes: vec![
            boxed(Shape::text_box(1, "First", TextFrame::from_text("Before"))),
            broken_shape(2),
            boxed(Shape::text_box(3, "Last", TextFrame::from_text("After"))),
        ],
    });

    let stats = DeckProcessor::new(translator.clone()).process(&mut deck).await;

    assert_eq!(translator.calls(), vec!["Before", "After"]);
    assert_eq!(stats.shapes_processed, 2);
    assert_eq!(stats.slides_processed, 1);
    assert_eq!(stats.errors.len(), 1);
    assert!(stats.errors[0].contains("id 2"));
}

#[tokio::test]
async fn test_process_withBrokenTable_shouldRecordTableError() {
    let translator = RecordingTranslator::with_pairs([("Next", "Naslednji")]);
    let mut deck = MixedDeck::single(MixedSlide {
        shapes: vec![broken_table(5), boxed(Shape::text_box(6, "Next", TextFrame::from_text("Next")))],
    });

    let stats = DeckProcessor::new(translator).process(&mut deck).await;

    assert_eq!(stats.tables_processed, 0);
    assert_eq!(stats.shapes_processed, 1);
    assert_eq!(stats.errors.len(), 1);
    assert!(stats.errors[0].contains("table"));
}

#[tokio::test]
async fn test_process_withBrokenNotes_shouldStillCountSlide() {
    let translator = RecordingTranslator::with_pairs([("Hello", "Zdravo")]);
    let slide = Slide::new(1, vec![Shape::text_box(2, "Text", TextFrame::from_text("Hello"))])
        .with_notes(TextFrame::from_text("Notes"));
    let mut deck = MixedDeck::single(BrokenNotesSlide(slide));

    let stats = DeckProcessor::new(translator).process(&mut deck).await;

    assert_eq!(stats.slides_processed, 1);
    assert_eq!(stats.notes_translated, 0);
    assert_eq!(stats.text_runs_translated, 1);
    assert_eq!(stats.errors.len(), 1);
    assert!(stats.errors[0].contains("notes"));
}

#[tokio::test]
async fn test_process_withUnstorableTranslation_shouldRecordShapeError() {
    let translator = RecordingTranslator::with_pairs([("Hello", "Zdr\u{0007}avo"), ("World", "Svet")]);
    let mut deck = single_slide(vec![
        Shape::text_box(1, "Bad", TextFrame::from_text("Hello")),
        Shape::text_box(2, "Good", TextFrame::from_text("World")),
    ]);

    let stats = DeckProcessor::new(translator).process(&mut deck).await;

    assert_eq!(title_frame(&deck).text(), "Hello");
    assert_eq!(deck.slides[0].shapes[1].text_frame().unwrap().text(), "Svet");
    assert_eq!(stats.shapes_processed, 1);
    assert_eq!(stats.errors.len(), 1);
    assert!(stats.errors[0].contains("Invalid run text"));
}

#[tokio::test]
async fn test_process_withUnstorableLaterPiece_shouldLeaveWholeParagraphUntouched() {
    let translator = RecordingTranslator::with_pairs([("Hello world", "Hola mu\u{0001}ndo")]);
    let mut deck = single_slide(vec![Shape::text_box(1, "T", TextFrame::from_paragraphs(vec![
        Paragraph::from_runs(vec![Run::new("Hello "), Run::bold("world")]),
    ]))]);
    let before = deck.clone();

    let stats = DeckProcessor::new(translator).process(&mut deck).await;

    assert_eq!(deck, before);
    assert_eq!(common::run_texts(title_frame(&deck)), vec![vec!["Hello ".to_string(), "world".to_string()]]);
    assert_eq!(stats.text_runs_translated, 0);
    assert_eq!(stats.errors.len(), 1);
    assert!(stats.errors[0].contains("'T' (id 1)"));
    assert!(stats.errors[0].contains("U+0001"));
}

#[tokio::test]
async fn test_process_withSampleDeck_shouldReportAllCounters() {
    let translator = RecordingTranslator::with_pairs(common::sample_translations());
    let mut deck = common::sample_deck();

    let stats = DeckProcessor::new(translator).process(&mut deck).await;

    assert_eq!(stats, ProcessingStats {
        slides_processed: 2,
        shapes_processed: 4,
        text_runs_translated: 8,
        tables_processed: 1,
        notes_translated: 1,
        groups_traversed: 2,
        errors: Vec::new(),
    });
}

#[tokio::test]
async fn test_process_calledTwice_shouldResetStats() {
    let translator = RecordingTranslator::with_pairs(common::sample_translations());
    let mut processor = DeckProcessor::new(translator);

    processor.process(&mut common::sample_deck()).await;
    let stats = processor.process(&mut common::sample_deck()).await;

    assert_eq!(stats.slides_processed, 2);
    assert_eq!(processor.stats(), &stats);
}

#[tokio::test]
async fn test_process_withEmptyDeck_shouldReturnZeroStats() {
    let translator: Arc<RecordingTranslator> = RecordingTranslator::with_pairs([("a", "b")]);
    let stats = DeckProcessor::new(translator).process(&mut Deck::default()).await;
    assert_eq!(stats, ProcessingStats::default());
    assert!(!stats.has_errors());
}
