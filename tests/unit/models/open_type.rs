use super::*;

#[test]
fn similarity_compares_kind_and_component_id() {
    assert!(OpenType::Code.is_similar(&OpenType::Code));
    assert!(!OpenType::Code.is_similar(&OpenType::Diff));
    assert!(OpenType::component("x").is_similar(&OpenType::component("x")));
    assert!(!OpenType::component("x").is_similar(&OpenType::component("y")));
    assert!(!OpenType::component("x").is_similar(&OpenType::Code));
}

#[test]
fn no_hint_picks_first_candidate() {
    let available = vec![OpenType::Code, OpenType::component("x")];
    assert_eq!(
        find_suitable_open_type(&available, None, None),
        Some(OpenType::Code)
    );
}

#[test]
fn previous_component_is_selected_again() {
    let available = vec![OpenType::Code, OpenType::component("x")];
    let previous = OpenType::component("x");
    assert_eq!(
        find_suitable_open_type(&available, Some(&previous), None),
        Some(OpenType::component("x"))
    );
}

#[test]
fn previous_without_similar_candidate_falls_back_to_first() {
    let available = vec![OpenType::Code, OpenType::component("x")];
    let previous = OpenType::component("gone");
    assert_eq!(
        find_suitable_open_type(&available, Some(&previous), None),
        Some(OpenType::Code)
    );
}

#[test]
fn forced_type_overrides_previous() {
    let available = vec![OpenType::Code, OpenType::component("x")];
    let previous = OpenType::Code;
    let forced = OpenType::component("x");
    assert_eq!(
        find_suitable_open_type(&available, Some(&previous), Some(&forced)),
        Some(OpenType::component("x"))
    );

    let missing = OpenType::Diff;
    assert_eq!(
        find_suitable_open_type(&available, Some(&previous), Some(&missing)),
        Some(OpenType::Code)
    );
}

#[test]
fn empty_candidates_resolve_to_none() {
    assert_eq!(find_suitable_open_type(&[], None, None), None);
}
