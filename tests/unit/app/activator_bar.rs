use super::*;
use crate::kernel::services::adapters::LoggingCommandService;

#[test]
fn panels_are_kept_per_side_in_insertion_order() {
    let commands = Rc::new(LoggingCommandService::new());
    let mut bar = ActivatorBar::new(commands);
    bar.append(PanelInfo::new("explorer", "Explorer"), Side::Left);
    bar.append(PanelInfo::new("outline", "Outline"), Side::Right);
    bar.append(PanelInfo::new("search", "Search"), Side::Left);

    let left: Vec<&str> = bar.panels(Side::Left).iter().map(|p| p.id.as_str()).collect();
    assert_eq!(left, ["explorer", "search"]);
    assert_eq!(bar.panels(Side::Right), &[PanelInfo::new("outline", "Outline")]);
}

#[test]
fn show_and_hide_dispatch_layout_commands() {
    let commands = Rc::new(LoggingCommandService::new());
    let bar = ActivatorBar::new(commands.clone());
    bar.show_panel(Side::Left);
    bar.hide_panel(Side::Right);

    assert_eq!(
        commands.history(),
        vec![
            ("main-layout.left-panel.show".to_string(), None),
            ("main-layout.right-panel.hide".to_string(), None),
        ]
    );
}

#[test]
fn side_round_trips_through_its_name() {
    for side in [Side::Left, Side::Right] {
        assert_eq!(Side::parse(side.as_str()), Some(side));
    }
    assert_eq!(Side::parse("center"), None);
    assert_eq!(serde_json::to_string(&Side::Right).unwrap(), r#""right""#);
}

#[test]
fn panel_title_defaults_to_empty() {
    let info: PanelInfo = serde_json::from_str(r#"{ "id": "scm" }"#).unwrap();
    assert_eq!(info, PanelInfo::new("scm", ""));
}
