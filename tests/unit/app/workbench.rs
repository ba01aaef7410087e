use super::*;
use crate::kernel::services::adapters::{LoggingCommandService, MemoryStorage, RecentFiles};
use crate::kernel::services::ports::{CursorStatus, Position, Storage, WorkbenchConfig};
use crate::test_support::{
    block_on, current_name, tab_names, uri, FakeComponents, FakeResources, Harness,
};

fn file(name: &str) -> Uri {
    uri(&format!("file:///{}", name))
}

fn stored_state(h: &Harness) -> Option<GridState<GroupSnapshot>> {
    let raw = h.storage.raw("workbench", "grid")?;
    Some(serde_json::from_str(&raw).unwrap())
}

fn prefill(h: &Harness, raw: &str) {
    h.storage.set("workbench", "grid", raw).unwrap();
}

#[test]
fn initialization_waits_for_contributions() {
    let services = WorkbenchServices::new(
        Rc::new(FakeResources::default()),
        Rc::new(FakeComponents::new()),
        Rc::new(MemoryStorage::new()),
        Rc::new(LoggingCommandService::new()),
        Rc::new(RecentFiles::new()),
    );
    let workbench = Workbench::new(services);

    block_on(async {
        let ((), ()) = tokio::join!(workbench.initialize(), async {
            for _ in 0..3 {
                tokio::task::yield_now().await;
            }
            assert!(!workbench.is_ready());
            assert!(workbench.groups().is_empty());
            workbench.signal_contributions_ready();
        });
        assert!(workbench.is_ready());
        assert_eq!(workbench.groups().len(), 1);
        assert!(workbench.grid_root().is_some());
    });
}

#[test]
fn concurrent_initialization_restores_once() {
    let h = Harness::new();
    let created = Rc::new(Cell::new(0));
    let _sub = h.workbench.events().group_created.subscribe({
        let created = created.clone();
        move |_| created.set(created.get() + 1)
    });

    block_on(async {
        let a = file("a.rs");
        let ((), (), opened) = tokio::join!(
            h.workbench.initialize(),
            h.workbench.initialize(),
            h.workbench.open(&a, OpenOptions::default())
        );
        assert!(opened.is_some());
        assert_eq!(created.get(), 1);
        assert_eq!(h.workbench.groups().len(), 1);
    });
}

#[test]
fn open_records_the_most_recent_file() {
    let h = Harness::new();
    block_on(async {
        h.workbench.open(&file("a.rs"), OpenOptions::default()).await;
        h.workbench.open(&file("b.rs"), OpenOptions::default()).await;
        assert_eq!(h.recent.most_recent(), Some(file("b.rs")));
        assert_eq!(h.recent.entries(), vec![file("b.rs"), file("a.rs")]);
        assert_eq!(h.workbench.current_resource().unwrap().uri, file("b.rs"));
        assert_eq!(h.workbench.current_editor_kind(), Some(EditorKind::Code));
        assert!(h.workbench.current_code_editor().is_some());
    });
}

#[test]
fn group_index_routes_or_splits_right() {
    let h = Harness::new();
    block_on(async {
        let first = h.start().await;
        h.workbench
            .open(&file("a.rs"), OpenOptions::in_group(0))
            .await
            .unwrap();
        assert_eq!(tab_names(&first), ["a.rs"]);

        let opened = h
            .workbench
            .open(&file("b.rs"), OpenOptions::in_group(5))
            .await
            .unwrap();
        let second = opened.group;
        assert_ne!(second, first);
        assert_eq!(h.workbench.groups(), vec![first.clone(), second.clone()]);

        h.workbench
            .open(&file("c.rs"), OpenOptions::in_group(1))
            .await
            .unwrap();
        assert_eq!(tab_names(&second), ["b.rs", "c.rs"]);
        assert_eq!(tab_names(&first), ["a.rs"]);
    });
}

#[test]
fn removing_a_group_reindexes_the_rest_and_moves_current() {
    let h = Harness::new();
    block_on(async {
        let first = h.start().await;
        let second = first
            .open(&file("a.rs"), OpenOptions::split(SplitAction::Right))
            .await
            .unwrap()
            .group;
        let third = second
            .open(&file("b.rs"), OpenOptions::split(SplitAction::Right))
            .await
            .unwrap()
            .group;

        let seen = Rc::new(RefCell::new(Vec::new()));
        let _sub = h.workbench.events().group_index_changed.subscribe({
            let seen = seen.clone();
            move |event: &GroupIndexChanged| {
                seen.borrow_mut()
                    .push((event.group.name().to_string(), event.index))
            }
        });

        h.workbench.remove_group(&first);
        assert_eq!(
            *seen.borrow(),
            vec![
                (second.name().to_string(), 0),
                (third.name().to_string(), 1)
            ]
        );
        assert_eq!(h.workbench.current_group(), Some(second.clone()));
        assert_eq!(second.index(), Some(0));
    });
}

#[test]
fn switching_current_group_announces_its_resource() {
    let h = Harness::new();
    block_on(async {
        let first = h.start().await;
        let second = first
            .open(&file("a.rs"), OpenOptions::split(SplitAction::Right))
            .await
            .unwrap()
            .group;

        let seen = Rc::new(RefCell::new(Vec::new()));
        let _sub = h.workbench.events().active_resource_changed.subscribe({
            let seen = seen.clone();
            move |resource: &Option<Rc<Resource>>| {
                seen.borrow_mut()
                    .push(resource.as_ref().map(|r| r.uri.clone()))
            }
        });

        h.workbench.set_current_group(&first);
        assert!(seen.borrow().is_empty());

        second.gain_focus();
        assert_eq!(*seen.borrow(), vec![Some(file("a.rs"))]);
        assert_eq!(h.workbench.current_group(), Some(second.clone()));

        second.open(&file("b.rs"), OpenOptions::default()).await.unwrap();
        assert_eq!(seen.borrow().last(), Some(&Some(file("b.rs"))));
    });
}

#[test]
fn tab_changes_persist_the_grid() {
    let h = Harness::new();
    block_on(async {
        h.start().await;
        h.workbench.open(&file("a.rs"), OpenOptions::default()).await;

        let state = stored_state(&h).unwrap();
        assert_eq!(
            state,
            GridState::Leaf {
                item: GroupSnapshot {
                    uris: vec![file("a.rs")],
                    current: Some(file("a.rs")),
                },
            }
        );
    });
}

#[test]
fn restore_does_not_write_back() {
    let h = Harness::new();
    let raw = r#"{ "editorGroup": { "uris": ["file:///a.rs", "file:///b.rs"], "current": "file:///a.rs" } }"#;
    prefill(&h, raw);

    block_on(async {
        let group = h.start().await;
        assert_eq!(tab_names(&group), ["a.rs", "b.rs"]);
        assert_eq!(current_name(&group).as_deref(), Some("a.rs"));
        assert_eq!(h.storage.raw("workbench", "grid").as_deref(), Some(raw));
    });
}

#[test]
fn layout_survives_a_reload() {
    let first = Harness::new();
    let saved = block_on(async {
        let left = first.start().await;
        left.open(&file("a.rs"), OpenOptions::default()).await;
        let right = left
            .open(&file("b.rs"), OpenOptions::split(SplitAction::Right))
            .await
            .unwrap()
            .group;
        right
            .open(&file("c.rs"), OpenOptions::split(SplitAction::Bottom))
            .await
            .unwrap();
        let root = first.workbench.grid_root().unwrap();
        first.workbench.resize_split(root, vec![1.0, 3.0]).unwrap();
        first.workbench.grid_state().unwrap()
    });
    assert_eq!(stored_state(&first), Some(saved.clone()));

    let second = Harness::with_storage(first.storage.clone());
    block_on(async {
        second.start().await;
        assert_eq!(second.workbench.grid_state(), Some(saved));

        let groups = second.workbench.grid_groups();
        let names: Vec<Vec<String>> = groups.iter().map(tab_names).collect();
        assert_eq!(names, vec![vec!["a.rs"], vec!["b.rs"], vec!["c.rs"]]);
        for group in &groups {
            assert!(group.current_resource().is_some());
        }
        second
            .workbench
            .with_grid(|grid| {
                assert_eq!(grid.weights(grid.root()), &[0.25, 0.75]);
            })
            .unwrap();
    });
}

#[test]
fn malformed_state_falls_back_to_one_empty_group() {
    let h = Harness::new();
    prefill(&h, "{ not json");
    block_on(async {
        let group = h.start().await;
        assert!(group.is_empty());
        assert_eq!(h.workbench.groups().len(), 1);
    });
}

#[test]
fn restore_can_be_turned_off() {
    let h = Harness::with_config(WorkbenchConfig {
        restore_on_startup: false,
        ..WorkbenchConfig::default()
    });
    prefill(&h, r#"{ "editorGroup": { "uris": ["file:///a.rs"] } }"#);
    block_on(async {
        let group = h.start().await;
        assert!(group.is_empty());
        assert_eq!(h.resources.total_fetches(), 0);
    });
}

#[test]
fn close_all_for_a_uri_touches_every_group() {
    let h = Harness::new();
    block_on(async {
        let left = h.start().await;
        left.open(&file("a.rs"), OpenOptions::default()).await;
        left.open(&file("b.rs"), OpenOptions::default()).await;
        let right = left
            .open(&file("a.rs"), OpenOptions::split(SplitAction::Right))
            .await
            .unwrap()
            .group;

        h.workbench.close_all(Some(&file("a.rs"))).await;
        assert_eq!(tab_names(&left), ["b.rs"]);
        assert!(right.is_disposed());
        assert_eq!(h.workbench.groups(), vec![left]);
    });
}

#[test]
fn close_all_skips_groups_that_decline() {
    let h = Harness::new();
    block_on(async {
        let left = h.start().await;
        left.open(&file("a.rs"), OpenOptions::default()).await;
        left.open(&file("b.rs"), OpenOptions::default()).await;
        let right = left
            .open(&file("c.rs"), OpenOptions::split(SplitAction::Right))
            .await
            .unwrap()
            .group;
        h.resources.refuse_close(&file("a.rs"));

        h.workbench.close_all(None).await;
        assert_eq!(tab_names(&left), ["a.rs", "b.rs"]);
        assert!(right.is_disposed());
        assert_eq!(h.workbench.groups(), vec![left]);
    });
}

#[test]
fn cursor_moves_surface_only_from_the_current_group() {
    let h = Harness::new();
    block_on(async {
        let left = h.start().await;
        left.open(&file("a.rs"), OpenOptions::default()).await;
        let right = left
            .open(&file("b.rs"), OpenOptions::split(SplitAction::Right))
            .await
            .unwrap()
            .group;

        let seen = Rc::new(RefCell::new(Vec::new()));
        let _sub = h.workbench.events().cursor_changed.subscribe({
            let seen = seen.clone();
            move |status: &CursorStatus| seen.borrow_mut().push(*status)
        });
        let status = CursorStatus {
            position: Some(Position { line: 3, column: 7 }),
            selection_length: 2,
        };

        h.code_editor(&right).move_cursor(status);
        assert!(seen.borrow().is_empty());

        h.code_editor(&left).move_cursor(status);
        assert_eq!(*seen.borrow(), vec![status]);
    });
}

#[test]
fn resizing_a_split_lays_out_the_groups_beneath_it() {
    let h = Harness::new();
    block_on(async {
        let left = h.start().await;
        let right = left
            .open(&file("a.rs"), OpenOptions::split(SplitAction::Right))
            .await
            .unwrap()
            .group;
        let before = (
            h.code_editor(&left).layout_count(),
            h.code_editor(&right).layout_count(),
        );

        let root = h.workbench.grid_root().unwrap();
        h.workbench.resize_split(root, vec![0.5, 0.5]).unwrap();
        assert_eq!(h.code_editor(&left).layout_count(), before.0 + 1);
        assert_eq!(h.code_editor(&right).layout_count(), before.1 + 1);

        let leaf = left.grid_node().unwrap();
        assert_eq!(
            h.workbench.resize_split(leaf, vec![1.0]),
            Err(GridError::NotASplit)
        );
        assert!(h.workbench.resize_split(root, vec![1.0]).is_err());
    });
}

#[test]
fn group_names_are_unique_hex() {
    let h = Harness::new();
    block_on(async {
        h.start().await;
        for _ in 0..32 {
            h.workbench.create_group();
        }
        let groups = h.workbench.groups();
        let mut names: Vec<String> = groups.iter().map(|g| g.name().to_string()).collect();
        for name in &names {
            assert_eq!(name.len(), GROUP_NAME_LEN);
            assert!(name.chars().all(|c| c.is_ascii_hexdigit()));
        }
        names.sort();
        names.dedup();
        assert_eq!(names.len(), groups.len());

        let last = groups.last().unwrap();
        assert_eq!(h.workbench.group(last.name()).as_ref(), Some(last));
        assert!(h.workbench.group("zzzzz").is_none());
    });
}

#[test]
fn disposing_a_group_persists_the_smaller_grid() {
    let h = Harness::new();
    block_on(async {
        let left = h.start().await;
        left.open(&file("a.rs"), OpenOptions::default()).await;
        let right = left
            .open(&file("b.rs"), OpenOptions::split(SplitAction::Right))
            .await
            .unwrap()
            .group;
        right.gain_focus();

        assert!(right.close(&file("b.rs")).await);
        assert_eq!(h.workbench.current_group(), Some(left.clone()));
        assert!(matches!(
            stored_state(&h),
            Some(GridState::Leaf { item }) if item.uris == vec![file("a.rs")]
        ));
    });
}

#[test]
fn weak_handle_does_not_keep_the_engine_alive() {
    let h = Harness::new();
    let weak = h.workbench.downgrade();
    assert!(weak.upgrade().is_some());
    drop(h);
    assert!(weak.upgrade().is_none());
}
