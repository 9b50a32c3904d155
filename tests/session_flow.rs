use std::path::PathBuf;

use healing_brush::brush::BrushSize;
use healing_brush::clone::CloneParams;
use healing_brush::io::load_image;
use healing_brush::{Event, FrameBuffer, Outcome, Point, Session, SessionState};

const GRAY: u32 = 0x00_80_80_80;

fn gray_session(output: PathBuf) -> Session {
    Session::new(FrameBuffer::filled(100, 100, GRAY), BrushSize::new(20, 50), output, CloneParams::default())
}

#[test]
fn heal_flat_gray_then_undo() {
    let mut session = gray_session(PathBuf::from("unused.png"));
    let original = session.history().current().clone();

    session.dispatch(Event::PointerMove(Point::new(30, 30)));
    assert!(matches!(session.dispatch(Event::Click(Point::new(30, 30))), Outcome::TargetSelected(_)));

    session.dispatch(Event::PointerMove(Point::new(70, 70)));
    assert_eq!(session.history().len(), 1);

    let outcome = session.dispatch(Event::Click(Point::new(70, 70)));
    assert!(matches!(outcome, Outcome::Committed { history_len: 2 }));
    assert_eq!(session.state(), SessionState::AwaitingTarget);

    // flat gray cloned onto flat gray: no seam, no change
    let healed = session.history().current();
    for y in 10..50 {
        for x in 10..50 {
            assert_eq!(healed.get(x, y), Some(GRAY), "({x},{y})");
        }
    }

    assert!(matches!(session.dispatch(Event::Undo), Outcome::Undone { history_len: 1 }));
    assert_eq!(session.history().current(), &original);
    assert!(matches!(session.dispatch(Event::Undo), Outcome::NothingToUndo));
}

#[test]
fn blemish_is_replaced_by_surrounding_texture() {
    // flat 120 background with a dark 6x6 blemish centred on (30, 30)
    let mut image = FrameBuffer::filled(100, 100, 0x00_78_78_78);
    for y in 27..33 {
        for x in 27..33 {
            image.pixels[y * 100 + x] = 0x00_10_10_10;
        }
    }
    let mut session = Session::new(image, BrushSize::new(10, 50), PathBuf::from("unused.png"), CloneParams::default());

    session.dispatch(Event::Click(Point::new(30, 30)));
    session.dispatch(Event::Click(Point::new(70, 70)));

    let healed = session.history().current();
    for y in 27..33 {
        for x in 27..33 {
            assert_eq!(healed.get(x, y), Some(0x00_78_78_78), "({x},{y})");
        }
    }
}

#[test]
fn saved_file_holds_the_committed_state_not_the_preview() {
    let path = std::env::temp_dir().join(format!("healing-brush-flow-{}.png", std::process::id()));
    let mut session = gray_session(path.clone());

    session.dispatch(Event::Click(Point::new(30, 30)));
    session.dispatch(Event::PointerMove(Point::new(75, 40)));
    assert_ne!(session.view(), session.history().current()); // circles are on the preview

    assert!(matches!(session.dispatch(Event::Save), Outcome::Saved(ref p) if *p == path));
    let written = load_image(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(&written, session.history().current());
}

#[test]
fn brush_changes_apply_to_the_next_commit() {
    let mut session = gray_session(PathBuf::from("unused.png"));
    session.dispatch(Event::SetBrush(45));
    // 45 around (30, 30) leaves the image
    assert!(matches!(session.dispatch(Event::Click(Point::new(30, 30))), Outcome::Rejected(_)));

    for _ in 0..20 {
        session.dispatch(Event::BrushDown);
    }
    assert_eq!(session.brush().get(), 25);
    assert!(matches!(session.dispatch(Event::Click(Point::new(30, 30))), Outcome::TargetSelected(_)));
    assert!(matches!(session.dispatch(Event::Click(Point::new(70, 70))), Outcome::Committed { .. }));
}
