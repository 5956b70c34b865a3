use super::*;

#[test]
fn identifiers_resolve_to_stable_elements() {
    let mut g = CellGraph::new();
    let mut reg = ElementRegistry::new();
    let first = reg.request(&mut g, "a");
    let again = reg.request(&mut g, vec!["a", "b", "a"]);
    assert_eq!(again.len(), 3);
    assert_eq!(again[0], first[0]);
    assert_eq!(again[2], first[0]);
    assert_ne!(again[1], first[0]);
    assert_eq!(reg.len(), 2);
}

#[test]
fn nested_selectors_flatten_in_order() {
    let mut g = CellGraph::new();
    let mut reg = ElementRegistry::new();
    let sel = Selector::Many(vec![
        Selector::from(1),
        Selector::from(vec![Selector::from("x"), Selector::from(2)]),
    ]);
    let out = reg.request(&mut g, sel);
    let ids: Vec<_> = out
        .iter()
        .map(|e| reg.identifier_of(e).cloned())
        .collect();
    assert_eq!(
        ids,
        vec![
            Some(Identifier::Index(1)),
            Some(Identifier::from("x")),
            Some(Identifier::Index(2)),
        ]
    );
}

#[test]
fn foreign_elements_get_a_token_once() {
    let mut g = CellGraph::new();
    let mut reg = ElementRegistry::new();
    let loose = Element::new(&mut g);
    reg.request(&mut g, loose);
    reg.request(&mut g, [loose, loose]);
    assert_eq!(reg.len(), 1);
    assert!(reg.identifier_of(&loose).is_some_and(Identifier::is_token));
    let id = reg.identifier_of(&loose).cloned();
    assert_eq!(id.and_then(|id| reg.get(&id)), Some(loose));
}

#[test]
fn string_and_integer_keys_are_distinct() {
    let mut g = CellGraph::new();
    let mut reg = ElementRegistry::new();
    let out = reg.request(&mut g, vec![Selector::from("1"), Selector::from(1)]);
    assert_ne!(out[0], out[1]);
}

#[test]
fn all_lists_in_registration_order() {
    let mut g = CellGraph::new();
    let mut reg = ElementRegistry::new();
    let made = reg.request(&mut g, ["c", "a", "b"]);
    assert_eq!(reg.all(), made);
}
