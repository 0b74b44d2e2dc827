use canvas_editor::item::{Item, Line, RasterImage};
use canvas_editor::{Command, CommandHistory, Scene};
use egui::{Color32, Pos2, Rect, Vec2};

fn line_item(offset: f32) -> Item {
    Item::drawing(Line::from_points(
        vec![Pos2::new(offset, offset), Pos2::new(offset + 20.0, offset + 30.0)],
        Color32::RED,
        2.0,
    ))
}

fn image_item() -> Item {
    let raster = RasterImage::from_rgba(100, 100, vec![255; 100 * 100 * 4]).unwrap();
    Item::image(raster, Pos2::ZERO)
}

fn rect_close(a: Rect, b: Rect) -> bool {
    (a.min - b.min).length() < 0.001 && (a.max - b.max).length() < 0.001
}

#[test]
fn test_insert_undo_redo() {
    let mut scene = Scene::new();
    let mut history = CommandHistory::new();
    let item = line_item(0.0);
    let id = item.id();

    history.execute(Command::Insert { item }, &mut scene).unwrap();
    let after = scene.get(id).cloned();
    assert!(after.is_some());

    history.undo(&mut scene).unwrap();
    assert!(scene.get(id).is_none());

    history.redo(&mut scene).unwrap();
    assert_eq!(scene.get(id).cloned(), after);
}

#[test]
fn test_move_undo_redo() {
    let mut scene = Scene::new();
    let mut history = CommandHistory::new();
    let item = image_item();
    let id = item.id();
    history.execute(Command::Insert { item }, &mut scene).unwrap();

    let command = Command::Move {
        id,
        before: Pos2::ZERO,
        after: Pos2::new(40.0, 25.0),
    };
    history.execute(command, &mut scene).unwrap();
    assert_eq!(scene.get(id).unwrap().position(), Pos2::new(40.0, 25.0));

    history.undo(&mut scene).unwrap();
    assert_eq!(scene.get(id).unwrap().position(), Pos2::ZERO);

    history.redo(&mut scene).unwrap();
    assert_eq!(scene.get(id).unwrap().position(), Pos2::new(40.0, 25.0));
}

#[test]
fn test_resize_undo_redo() {
    let mut scene = Scene::new();
    let mut history = CommandHistory::new();
    let item = line_item(10.0);
    let id = item.id();
    let before = item.frame();
    history.execute(Command::Insert { item }, &mut scene).unwrap();

    let after = Rect::from_min_size(Pos2::new(5.0, 5.0), Vec2::new(60.0, 90.0));
    history
        .execute(Command::Resize { id, before, after }, &mut scene)
        .unwrap();
    assert!(rect_close(scene.get(id).unwrap().frame(), after));

    history.undo(&mut scene).unwrap();
    assert!(rect_close(scene.get(id).unwrap().frame(), before));

    history.redo(&mut scene).unwrap();
    assert!(rect_close(scene.get(id).unwrap().frame(), after));
}

#[test]
fn test_reapplying_previewed_state_is_idempotent() {
    let mut scene = Scene::new();
    let mut history = CommandHistory::new();
    let item = image_item();
    let id = item.id();
    history.execute(Command::Insert { item }, &mut scene).unwrap();

    // A gesture already moved the item before the command is recorded
    scene.get_mut(id).unwrap().set_position(Pos2::new(10.0, 10.0));
    history
        .execute(
            Command::Move {
                id,
                before: Pos2::ZERO,
                after: Pos2::new(10.0, 10.0),
            },
            &mut scene,
        )
        .unwrap();
    assert_eq!(scene.get(id).unwrap().position(), Pos2::new(10.0, 10.0));
}

#[test]
fn test_remove_undo_restores_paint_order() {
    let mut scene = Scene::new();
    let mut history = CommandHistory::new();
    let items = [line_item(0.0), line_item(10.0), line_item(20.0)];
    let ids: Vec<_> = items.iter().map(|item| item.id()).collect();
    for item in items {
        history.execute(Command::Insert { item }, &mut scene).unwrap();
    }

    let remove = Command::remove(&scene, ids[1]).unwrap();
    history.execute(remove, &mut scene).unwrap();
    assert_eq!(scene.len(), 2);

    history.undo(&mut scene).unwrap();
    assert_eq!(scene.index_of(ids[1]), Some(1));
}

#[test]
fn test_reorder_undo() {
    let mut scene = Scene::new();
    let mut history = CommandHistory::new();
    let items = [line_item(0.0), line_item(10.0), line_item(20.0)];
    let ids: Vec<_> = items.iter().map(|item| item.id()).collect();
    for item in items {
        history.execute(Command::Insert { item }, &mut scene).unwrap();
    }

    let command = Command::Reorder {
        id: ids[2],
        from: 2,
        to: 0,
    };
    assert_eq!(command.label(), "Move back");
    history.execute(command, &mut scene).unwrap();
    assert_eq!(scene.index_of(ids[2]), Some(0));

    history.undo(&mut scene).unwrap();
    assert_eq!(scene.index_of(ids[2]), Some(2));
}

#[test]
fn test_new_edit_after_undo_clears_redo() {
    let mut scene = Scene::new();
    let mut history = CommandHistory::new();
    history
        .execute(Command::Insert { item: line_item(0.0) }, &mut scene)
        .unwrap();
    history
        .execute(Command::Insert { item: line_item(5.0) }, &mut scene)
        .unwrap();

    history.undo(&mut scene).unwrap();
    assert!(history.can_redo());

    history
        .execute(Command::Insert { item: line_item(9.0) }, &mut scene)
        .unwrap();
    assert!(!history.can_redo());
    assert_eq!(history.undo_stack().len(), 2);
}

#[test]
fn test_stack_sizes_after_undos() {
    let n = 6;
    for m in 0..=n {
        let mut scene = Scene::new();
        let mut history = CommandHistory::new();
        for i in 0..n {
            history
                .execute(Command::Insert { item: line_item(i as f32) }, &mut scene)
                .unwrap();
        }
        for _ in 0..m {
            history.undo(&mut scene).unwrap();
        }
        assert_eq!(history.undo_stack().len(), n - m);
        assert_eq!(history.redo_stack().len(), m);
        assert_eq!(scene.len(), n - m);
    }
}

#[test]
fn test_clear_empties_both_stacks() {
    let mut scene = Scene::new();
    let mut history = CommandHistory::new();
    history
        .execute(Command::Insert { item: line_item(0.0) }, &mut scene)
        .unwrap();
    history
        .execute(Command::Insert { item: line_item(1.0) }, &mut scene)
        .unwrap();
    history.undo(&mut scene).unwrap();

    history.clear();
    assert!(!history.can_undo());
    assert!(!history.can_redo());
}
