use cantor::sets::{self, Set};

fn set(items: &[&str]) -> Set {
    Set::from_items(items.iter().copied())
}

#[test]
fn union_collects_every_input() {
    let a = set(&["a", "b"]);
    let b = set(&["b", "c"]);
    let c = Set::new();
    assert!(sets::union(&[&a, &b, &c]).same_as(&set(&["a", "b", "c"])));
    // commutative
    assert!(sets::union(&[&a, &b]).same_as(&sets::union(&[&b, &a])));
    // associative
    let d = set(&["d"]);
    let left = sets::union(&[&sets::union(&[&a, &b]), &d]);
    let right = sets::union(&[&a, &sets::union(&[&b, &d])]);
    assert!(left.same_as(&right));
}

#[test]
fn operations_on_no_inputs_yield_empty() {
    assert!(sets::union(&[]).is_empty());
    assert!(sets::intersection(&[]).is_empty());
    assert!(sets::difference(&[]).is_empty());
    assert!(sets::symmetric_difference(&[]).is_empty());
}

#[test]
fn intersection_keeps_elements_present_in_all_inputs() {
    let a = set(&["a", "b", "c"]);
    let b = set(&["b", "c", "d"]);
    assert!(sets::intersection(&[&a, &b]).same_as(&set(&["b", "c"])));
    assert!(sets::intersection(&[&a, &b]).same_as(&sets::intersection(&[&b, &a])));
    let c = set(&["c", "d", "e"]);
    assert!(sets::intersection(&[&a, &b, &c]).same_as(&set(&["c"])));
    // the same set twice intersects to itself, counting handles duplication
    assert!(sets::intersection(&[&a, &a]).same_as(&a));
    // empty input wipes everything
    assert!(sets::intersection(&[&a, &Set::new()]).is_empty());
}

#[test]
fn difference_privileges_its_first_operand() {
    let a = set(&["a", "b", "c"]);
    let b = set(&["b"]);
    let c = set(&["c", "d"]);
    assert!(sets::difference(&[&a, &b, &c]).same_as(&set(&["a"])));
    // a single operand passes through unchanged
    assert!(sets::difference(&[&a]).same_as(&a));
    // not symmetric
    assert!(!sets::difference(&[&a, &b]).same_as(&sets::difference(&[&b, &a])));
    // self-difference annihilates
    assert!(sets::difference(&[&a, &a]).is_empty());
}

#[test]
fn symmetric_difference_keeps_elements_seen_exactly_once() {
    let a = set(&["a", "b"]);
    let b = set(&["b", "c"]);
    assert!(sets::symmetric_difference(&[&a, &b]).same_as(&set(&["a", "c"])));
    assert!(sets::symmetric_difference(&[&a, &a]).is_empty());
}

#[test]
fn three_way_symmetric_difference_diverges_from_iterated_pairwise() {
    let a = set(&["x", "y"]);
    let b = set(&["x", "z"]);
    let c = set(&["x", "w"]);
    // "x" occurs three times, so it is dropped; the iterated pairwise form
    // ((a ^ b) ^ c) would have kept it
    assert!(sets::symmetric_difference(&[&a, &b, &c]).same_as(&set(&["y", "z", "w"])));
    let pairwise = sets::symmetric_difference(&[&sets::symmetric_difference(&[&a, &b]), &c]);
    assert!(pairwise.contains("x"));
}

#[test]
fn union_and_intersection_identity_laws() {
    let a = set(&["a", "b"]);
    let empty = Set::new();
    assert!(sets::union(&[&a, &empty]).same_as(&a));
    assert!(sets::intersection(&[&a, &empty]).is_empty());
}

#[test]
fn operations_never_mutate_their_inputs() {
    let a = set(&["a", "b"]);
    let b = set(&["b", "c"]);
    let before = a.clone();
    sets::union(&[&a, &b]);
    sets::intersection(&[&a, &b]);
    sets::difference(&[&a, &b]);
    sets::symmetric_difference(&[&a, &b]);
    assert!(a.same_as(&before));
}

#[test]
fn superset_and_subset_are_strict() {
    let a = set(&["a", "b", "c"]);
    let b = set(&["a", "b"]);
    assert!(a.superset_of(&b));
    assert!(b.subset_of(&a));
    // strictness: a set is neither a superset nor a subset of itself
    assert!(!a.superset_of(&a));
    assert!(!a.subset_of(&a));
    // size alone is not enough
    let c = set(&["a", "x"]);
    assert!(!a.superset_of(&set(&["a", "b", "d"])));
    assert!(!c.subset_of(&a));
}

#[test]
fn disjoint_and_equality_predicates() {
    let a = set(&["a", "b"]);
    let b = set(&["c", "d", "e"]);
    assert!(a.disjoint_of(&b));
    assert!(b.disjoint_of(&a));
    assert!(!a.disjoint_of(&set(&["b"])));
    assert!(a.same_as(&set(&["b", "a"])));
    assert!(!a.same_as(&b));
    assert!(a.contains("a"));
    assert!(!a.contains("z"));
}

#[test]
fn mutators_report_whether_the_set_changed() {
    let mut a = set(&["a"]);
    assert!(a.add("b"));
    assert!(!a.add("b"));
    assert!(a.remove("a"));
    assert!(!a.remove("a"));
    assert!(a.same_as(&set(&["b"])));
}

#[test]
fn items_are_sorted_for_stable_output() {
    let a = set(&["c", "a", "b"]);
    assert_eq!(a.items(), ["a", "b", "c"]);
    assert_eq!(a.len(), 3);
}
