use std::cell::Cell;
use std::rc::Rc;

use clinic_hours::api::{EditorConfig, ScheduleDayEditor};
use clinic_hours::core::{BlockId, BlockIdAllocator, DayOfWeek, TimeBlock};
use clinic_hours::interaction::{DragKind, DragState, DragUpdate, PointerListenerScope};

fn block(id: u64, start: u16, end: u16) -> TimeBlock {
    TimeBlock::new(BlockId::from_raw(id), format!("Shift {id}"), start, end)
}

/// Editor on a 1440 px bar, so one pixel is one minute.
fn editor_with(blocks: Vec<TimeBlock>) -> ScheduleDayEditor {
    let mut editor =
        ScheduleDayEditor::new(DayOfWeek::new(1).expect("monday"), EditorConfig::default())
            .expect("editor");
    editor.set_bar_geometry(0.0, 1440.0).expect("geometry");
    assert!(editor.replace_blocks(blocks));
    editor
}

fn spans(editor: &ScheduleDayEditor) -> Vec<(u16, u16)> {
    editor
        .blocks()
        .iter()
        .map(|block| (block.start_minute, block.end_minute))
        .collect()
}

#[test]
fn move_shifts_block_by_snapped_delta() {
    let mut editor = editor_with(vec![block(1, 600, 720)]);
    assert!(editor.pointer_down(BlockId::from_raw(1), DragKind::Move, 650.0));

    assert_eq!(
        editor.pointer_move(713.0),
        DragUpdate::Applied {
            start_minute: 660,
            end_minute: 780
        }
    );
    assert_eq!(editor.pointer_move(714.0), DragUpdate::Unchanged);
    assert!(editor.pointer_up());
    assert_eq!(spans(&editor), vec![(660, 780)]);
    assert_eq!(editor.schedule().blocks()[0].id, BlockId::from_raw(1));
}

#[test]
fn move_clamps_at_both_ends_of_the_day() {
    let mut editor = editor_with(vec![block(1, 600, 720)]);
    assert!(editor.pointer_down(BlockId::from_raw(1), DragKind::Move, 650.0));

    editor.pointer_move(-50.0);
    assert_eq!(spans(&editor), vec![(0, 120)]);

    editor.pointer_move(5_000.0);
    assert_eq!(spans(&editor), vec![(1319, 1439)]);
}

#[test]
fn move_can_jump_over_a_neighbor_and_resorts() {
    let mut editor = editor_with(vec![block(1, 600, 720), block(2, 800, 920)]);
    assert!(editor.pointer_down(BlockId::from_raw(1), DragKind::Move, 600.0));

    assert_eq!(editor.pointer_move(700.0), DragUpdate::Rejected);
    assert_eq!(spans(&editor), vec![(600, 720), (800, 920)]);

    assert_eq!(editor.pointer_move(900.0), DragUpdate::Rejected);
    assert_eq!(spans(&editor), vec![(600, 720), (800, 920)]);

    assert!(matches!(
        editor.pointer_move(1_000.0),
        DragUpdate::Applied {
            start_minute: 1000,
            end_minute: 1120
        }
    ));
    assert_eq!(spans(&editor), vec![(800, 920), (1000, 1120)]);
    assert_eq!(editor.blocks()[1].id, BlockId::from_raw(1));
}

#[test]
fn rejected_candidate_keeps_last_valid_preview() {
    let mut editor = editor_with(vec![block(1, 600, 720), block(2, 800, 920)]);
    assert!(editor.pointer_down(BlockId::from_raw(1), DragKind::Move, 600.0));

    editor.pointer_move(650.0);
    let before = editor.blocks().to_vec();
    assert_eq!(editor.pointer_move(720.0), DragUpdate::Rejected);
    assert_eq!(editor.blocks(), before.as_slice());

    assert!(editor.pointer_up());
    assert_eq!(spans(&editor), vec![(650, 770), (800, 920)]);
}

#[test]
fn resize_start_respects_min_duration_and_day_start() {
    let mut editor = editor_with(vec![block(1, 600, 840)]);
    assert!(editor.pointer_down(BlockId::from_raw(1), DragKind::ResizeStart, 600.0));

    editor.pointer_move(100.0);
    assert_eq!(spans(&editor), vec![(100, 840)]);

    editor.pointer_move(800.0);
    assert_eq!(spans(&editor), vec![(720, 840)]);

    editor.pointer_move(-30.0);
    assert_eq!(spans(&editor), vec![(0, 840)]);
}

#[test]
fn resize_end_below_minimum_clamps_to_min_duration() {
    let mut editor = editor_with(vec![block(1, 600, 840)]);
    editor.set_bar_geometry(0.0, 1000.0).expect("geometry");
    assert!(editor.pointer_down(BlockId::from_raw(1), DragKind::ResizeEnd, 583.0));

    assert_eq!(
        editor.pointer_move(451.0),
        DragUpdate::Applied {
            start_minute: 600,
            end_minute: 720
        }
    );
    assert!(editor.pointer_up());
    assert_eq!(spans(&editor), vec![(600, 720)]);
}

#[test]
fn resize_end_clamps_to_last_minute() {
    let mut editor = editor_with(vec![block(1, 600, 840)]);
    assert!(editor.pointer_down(BlockId::from_raw(1), DragKind::ResizeEnd, 840.0));

    editor.pointer_move(3_000.0);
    assert_eq!(spans(&editor), vec![(600, 1439)]);
}

#[test]
fn resize_into_neighbor_is_rejected() {
    let mut editor = editor_with(vec![block(1, 600, 720), block(2, 800, 920)]);
    assert!(editor.pointer_down(BlockId::from_raw(1), DragKind::ResizeEnd, 720.0));

    assert_eq!(
        editor.pointer_move(800.0),
        DragUpdate::Applied {
            start_minute: 600,
            end_minute: 800
        }
    );
    assert_eq!(editor.pointer_move(810.0), DragUpdate::Rejected);
    assert_eq!(spans(&editor), vec![(600, 800), (800, 920)]);
}

#[test]
fn drag_state_tracks_the_grabbed_handle() {
    let mut editor = editor_with(vec![block(1, 600, 720)]);
    assert_eq!(editor.drag_state(), DragState::Idle);
    assert_eq!(editor.pointer_move(10.0), DragUpdate::Idle);

    assert!(!editor.pointer_down(BlockId::from_raw(99), DragKind::Move, 650.0));
    assert!(editor.pointer_down(BlockId::from_raw(1), DragKind::ResizeStart, 600.0));
    let DragState::Dragging(origin) = editor.drag_state() else {
        panic!("expected dragging state");
    };
    assert_eq!(origin.kind, DragKind::ResizeStart);
    assert_eq!((origin.origin_start, origin.origin_end), (600, 720));

    assert!(!editor.pointer_down(BlockId::from_raw(1), DragKind::Move, 650.0));
    assert!(editor.cancel_drag());
    assert_eq!(editor.drag_state(), DragState::Idle);
    assert!(!editor.cancel_drag());
}

#[test]
fn preview_only_commits_on_release() {
    let mut editor = editor_with(vec![block(1, 600, 720)]);
    let revision = editor.revision();
    assert!(editor.pointer_down(BlockId::from_raw(1), DragKind::Move, 600.0));

    editor.pointer_move(700.0);
    assert_eq!(spans(&editor), vec![(700, 820)]);
    assert_eq!(editor.schedule().blocks()[0].start_minute, 600);
    assert_eq!(editor.revision(), revision);

    assert!(editor.pointer_up());
    assert_eq!(editor.schedule().blocks()[0].start_minute, 700);
    assert_eq!(editor.revision(), revision + 1);
}

#[test]
fn release_without_movement_does_not_bump_revision() {
    let mut editor = editor_with(vec![block(1, 600, 720)]);
    let revision = editor.revision();
    assert!(editor.pointer_down(BlockId::from_raw(1), DragKind::Move, 600.0));
    assert!(editor.pointer_up());
    assert_eq!(editor.revision(), revision);
}

#[test]
fn pointer_up_suppresses_the_trailing_click_until_tick() {
    // Window far longer than the test so only tick() can clear it.
    let config = EditorConfig::default().with_click_suppression_ms(600_000);
    let mut editor = ScheduleDayEditor::new(DayOfWeek::SUNDAY, config).expect("editor");
    editor.set_bar_geometry(0.0, 1440.0).expect("geometry");
    assert!(editor.replace_blocks(vec![block(1, 600, 720)]));
    assert!(editor.pointer_down(BlockId::from_raw(1), DragKind::Move, 600.0));
    editor.pointer_move(700.0);
    assert!(editor.pointer_up());

    assert!(editor.is_click_suppressed());
    assert!(editor.create_block_at(100.0).is_none());
    assert!(editor.select_block(BlockId::from_raw(1)).is_none());
    assert_eq!(editor.schedule().len(), 1);

    editor.tick();
    assert!(!editor.is_click_suppressed());
    assert!(editor.select_block(BlockId::from_raw(1)).is_some());
    assert!(editor.create_block_at(100.0).is_some());
}

#[test]
fn pointer_leave_commits_without_suppressing_clicks() {
    let mut editor = editor_with(vec![block(1, 600, 720)]);
    assert!(editor.pointer_down(BlockId::from_raw(1), DragKind::Move, 600.0));
    editor.pointer_move(400.0);

    assert!(editor.pointer_leave());
    assert!(!editor.is_dragging());
    assert!(!editor.is_click_suppressed());
    assert_eq!(spans(&editor), vec![(400, 520)]);
}

#[test]
fn cancel_commits_last_valid_preview() {
    let mut editor = editor_with(vec![block(1, 600, 720)]);
    assert!(editor.pointer_down(BlockId::from_raw(1), DragKind::ResizeEnd, 720.0));
    editor.pointer_move(900.0);

    assert!(editor.cancel_drag());
    assert_eq!(spans(&editor), vec![(600, 900)]);
    assert!(!editor.is_click_suppressed());
}

#[test]
fn zero_suppression_window_never_swallows_clicks() {
    let config = EditorConfig::default().with_click_suppression_ms(0);
    let mut editor = ScheduleDayEditor::new(DayOfWeek::SUNDAY, config).expect("editor");
    editor.set_bar_geometry(0.0, 1440.0).expect("geometry");
    assert!(editor.replace_blocks(vec![block(1, 600, 720)]));

    assert!(editor.pointer_down(BlockId::from_raw(1), DragKind::Move, 600.0));
    assert!(editor.pointer_up());
    assert!(!editor.is_click_suppressed());
}

#[test]
fn listeners_are_bound_once_per_drag_and_released_on_every_exit() {
    let mut editor = editor_with(vec![block(1, 600, 720)]);
    let id = BlockId::from_raw(1);

    assert!(editor.pointer_down(id, DragKind::Move, 600.0));
    assert!(editor.listeners_held());
    assert!(editor.listener_scope().is_bound());
    assert!(editor.pointer_up());
    assert!(!editor.listener_scope().is_bound());

    assert!(editor.pointer_down(id, DragKind::Move, 600.0));
    assert!(editor.pointer_leave());
    assert!(editor.pointer_down(id, DragKind::ResizeEnd, 600.0));
    assert!(editor.cancel_drag());

    let scope = *editor.listener_scope();
    assert_eq!(scope.binds, 3);
    assert_eq!(scope.unbinds, 3);
    assert!(!editor.listeners_held());
}

#[derive(Debug, Clone, Default)]
struct SharedScope {
    bound: Rc<Cell<i32>>,
}

impl PointerListenerScope for SharedScope {
    fn bind(&mut self) {
        self.bound.set(self.bound.get() + 1);
    }

    fn unbind(&mut self) {
        self.bound.set(self.bound.get() - 1);
    }
}

#[test]
fn dropping_an_editor_mid_drag_releases_listeners() {
    let scope = SharedScope::default();
    let bound = Rc::clone(&scope.bound);
    let mut editor = ScheduleDayEditor::with_session(
        DayOfWeek::SATURDAY,
        EditorConfig::default(),
        BlockIdAllocator::new(),
        scope,
    )
    .expect("editor");
    assert!(editor.replace_blocks(vec![block(1, 600, 720)]));

    assert!(editor.pointer_down(BlockId::from_raw(1), DragKind::Move, 600.0));
    assert_eq!(bound.get(), 1);
    drop(editor);
    assert_eq!(bound.get(), 0);
}

#[test]
fn crud_is_ignored_while_dragging() {
    let mut editor = editor_with(vec![block(1, 600, 720), block(2, 900, 1020)]);
    let revision = editor.revision();
    assert!(editor.pointer_down(BlockId::from_raw(1), DragKind::Move, 600.0));

    assert!(editor.create_block_at(100.0).is_none());
    assert!(!editor.delete_block(BlockId::from_raw(2)));
    assert!(!editor.rename_block(BlockId::from_raw(2), "Evening"));
    assert!(!editor.replace_blocks(Vec::new()));
    assert!(!editor.copy_from_previous_day(&[block(7, 0, 120)]));
    assert_eq!(editor.revision(), revision);

    assert!(editor.pointer_up());
    assert_eq!(editor.schedule().len(), 2);
}
