// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! End-to-end family scenarios.

#![allow(missing_docs)]
#![allow(clippy::expect_used)]
mod common;

use common::{build, father, id, input, kin, mother, partner, person, role};
use pedigree_core::{Anomaly, Coding, NodeId, NodeKind, RelationshipRecord, Sex, Side};

// =============================================================================
// Single couple, two children
// =============================================================================

#[test]
fn single_couple_with_two_children() {
    let out = build(&input(
        vec![
            person("a", Sex::Female),
            person("b", Sex::Male),
            person("c", Sex::Female),
            person("d", Sex::Male),
        ],
        vec![
            partner("a", "b"),
            mother("c", "a"),
            father("c", "b"),
            mother("d", "a"),
            father("d", "b"),
        ],
    ));
    let g = &out.graph;
    let (a, b, c, d) = (id(&out, "a"), id(&out, "b"), id(&out, "c"), id(&out, "d"));
    assert_eq!((a, b, c, d), (NodeId(0), NodeId(1), NodeId(2), NodeId(3)));

    let partnerships: Vec<_> = g.ids_of_kind(NodeKind::Partnership).collect();
    assert_eq!(partnerships, vec![NodeId(4)]);
    let p = partnerships[0];
    assert_eq!(g.partnership_between(a, b), Some(p));

    let hub = g.child_hub_of(p).expect("couple shares children");
    assert_eq!(hub, NodeId(5));
    assert_eq!(g.children_of_hub(hub).collect::<Vec<_>>(), vec![c, d]);

    assert_eq!(out.ranks.roots(), &[a, b]);
    assert_eq!(out.ranks.depth(c), Some(1));
    assert_eq!(out.rank(a), Some(3));
    assert_eq!(out.rank(b), Some(3));
    assert_eq!(out.rank(c), Some(1));
    assert_eq!(out.rank(d), Some(1));
    assert_eq!(out.rank(p), Some(3));
    assert_eq!(out.rank(hub), Some(2));

    assert_eq!(out.layout.row(3), &[a, b, p]);
    assert_eq!(out.layout.row(2), &[hub]);
    assert_eq!(out.layout.row(1), &[c, d]);
    assert!(out.layout.row(0).is_empty());
    assert_eq!(out.layout.order_table().len(), 5);
    assert_eq!(out.position(a), Some(-12.0));
    assert_eq!(out.position(b), Some(0.0));
    assert_eq!(out.position(p), Some(12.0));
    assert_eq!(out.position(hub), Some(0.0));
    assert_eq!(out.position(c), Some(-12.0));
    assert_eq!(out.position(d), Some(12.0));

    let summary = out.summary();
    assert_eq!(summary.total_nodes, 6);
    assert_eq!(summary.person_nodes, 4);
    assert_eq!(summary.partnership_nodes, 1);
    assert_eq!(summary.child_hub_nodes, 1);
    assert_eq!(summary.max_rank, 3);
    assert_eq!(summary.generations, 2);
    assert!(out.anomalies.is_empty());
}

// =============================================================================
// Three generations
// =============================================================================

#[test]
fn three_generations_rank_by_depth() {
    let out = build(&input(
        vec![
            person("grandma", Sex::Female),
            person("grandpa", Sex::Male),
            person("parent", Sex::Female),
            person("in-law", Sex::Male),
            person("child", Sex::Unknown),
            person("nana", Sex::Female),
            person("pop", Sex::Male),
        ],
        vec![
            mother("parent", "grandma"),
            partner("grandma", "grandpa"),
            father("parent", "grandpa"),
            partner("nana", "pop"),
            mother("in-law", "nana"),
            father("in-law", "pop"),
            partner("parent", "in-law"),
            mother("child", "parent"),
            father("child", "in-law"),
        ],
    ));
    let grandma = id(&out, "grandma");
    let parent = id(&out, "parent");
    let child = id(&out, "child");

    assert_eq!(out.ranks.depth(grandma), Some(0));
    assert_eq!(out.ranks.depth(parent), Some(1));
    assert_eq!(out.ranks.depth(child), Some(2));
    assert_eq!(out.rank(grandma), Some(5));
    assert_eq!(out.rank(parent), Some(3));
    assert_eq!(out.rank(child), Some(1));

    let in_law = id(&out, "in-law");
    let couple = out.graph.partnership_between(parent, in_law).expect("couple");
    assert_eq!(out.rank(couple), Some(3));
    let hub = out.graph.child_hub_of(couple).expect("hub");
    assert_eq!(out.rank(hub), Some(2));
    assert_eq!(out.summary().generations, 3);
    assert_eq!(out.summary().max_rank, 5);

    // Rank 5 lies past the pre-allocated rows, so the order table grows.
    let grandpa = id(&out, "grandpa");
    let nana = id(&out, "nana");
    let pop = id(&out, "pop");
    let elders = out.graph.partnership_between(grandma, grandpa).expect("elders");
    let in_laws = out.graph.partnership_between(nana, pop).expect("in-laws");
    assert_eq!(out.layout.order_table().len(), 6);
    assert_eq!(
        out.layout.row(5),
        &[grandma, grandpa, nana, pop, elders, in_laws]
    );
    assert_eq!(out.layout.row(3), &[parent, in_law, couple]);
    assert_eq!(out.layout.row(1), &[child]);
}

#[test]
fn spouse_without_recorded_parents_pulls_children_up() {
    // The in-law is a root, and roots are expanded before the second
    // generation, so the child is first reached at depth 1.
    let out = build(&input(
        vec![
            person("grandma", Sex::Female),
            person("grandpa", Sex::Male),
            person("parent", Sex::Female),
            person("in-law", Sex::Male),
            person("child", Sex::Unknown),
        ],
        vec![
            mother("parent", "grandma"),
            partner("grandma", "grandpa"),
            father("parent", "grandpa"),
            partner("parent", "in-law"),
            mother("child", "parent"),
            father("child", "in-law"),
        ],
    ));
    let in_law = id(&out, "in-law");
    let child = id(&out, "child");
    assert_eq!(out.ranks.depth(in_law), Some(0));
    assert_eq!(out.ranks.depth(child), Some(1));
    assert_eq!(out.ranks.max_depth(), 1);
    assert_eq!(out.rank(id(&out, "parent")), Some(1));
    assert_eq!(out.rank(child), Some(1));
}

#[test]
fn single_parent_records_stay_detached() {
    // Only one parent is recorded for each child, so no hub links the generations.
    let out = build(&input(
        vec![
            person("grandma", Sex::Female),
            person("grandpa", Sex::Male),
            person("parent", Sex::Female),
            person("child", Sex::Unknown),
        ],
        vec![
            mother("parent", "grandma"),
            partner("grandma", "grandpa"),
            mother("child", "parent"),
        ],
    ));
    assert_eq!(out.graph.ids_of_kind(NodeKind::ChildHub).count(), 0);
    assert_eq!(out.ranks.roots().len(), 4);
    for (id, _) in out.graph.iter_nodes() {
        assert_eq!(out.rank(id), Some(1));
    }
}

#[test]
fn child_codes_link_the_same_family_as_parent_codes() {
    let persons = vec![
        person("mum", Sex::Female),
        person("dad", Sex::Male),
        person("kid", Sex::Female),
    ];
    let by_parent = build(&input(
        persons.clone(),
        vec![partner("mum", "dad"), mother("kid", "mum"), father("kid", "dad")],
    ));
    let by_child = build(&input(
        persons,
        vec![
            role("dad", "127848009", "mum"),
            kin("mum", "DAU", "kid"),
            role("dad", "67822003", "kid"),
        ],
    ));
    assert_eq!(by_parent.graph, by_child.graph);
    assert_eq!(by_parent.ranks, by_child.ranks);
    assert_eq!(by_parent.layout, by_child.layout);
}

// =============================================================================
// Dropped statements
// =============================================================================

#[test]
fn unknown_code_is_dropped_without_touching_the_rest() {
    let weird = RelationshipRecord::new(
        "c",
        Coding::new("http://example.org/family", "godmother"),
        "a",
    );
    let out = build(&input(
        vec![person("a", Sex::Female), person("b", Sex::Male), person("c", Sex::Male)],
        vec![partner("a", "b"), weird, mother("c", "a"), father("c", "b")],
    ));
    assert_eq!(out.graph.edges().len(), 2 + 1 + 1);
    assert_eq!(
        out.anomalies,
        vec![Anomaly::UnrecognizedRelationship {
            index: 1,
            subject: "c".into(),
            target: "a".into(),
            code: "godmother".into(),
        }]
    );
    assert_eq!(out.rank(id(&out, "c")), Some(1));
}

#[test]
fn dangling_reference_is_reported_and_skipped() {
    let clean = build(&input(
        vec![person("a", Sex::Female), person("b", Sex::Male), person("c", Sex::Male)],
        vec![partner("a", "b"), mother("c", "a"), father("c", "b")],
    ));
    let dirty = build(&input(
        vec![person("a", Sex::Female), person("b", Sex::Male), person("c", Sex::Male)],
        vec![
            partner("a", "b"),
            mother("c", "a"),
            father("ghost", "b"),
            father("c", "b"),
            partner("nobody", "none"),
        ],
    ));
    assert_eq!(clean.graph, dirty.graph);
    assert_eq!(clean.ranks, dirty.ranks);
    assert_eq!(clean.layout, dirty.layout);
    assert_eq!(
        dirty.anomalies,
        vec![
            Anomaly::UnresolvedReference {
                index: 2,
                subject: "ghost".into(),
                target: "b".into(),
                missing: Side::Subject,
            },
            Anomaly::UnresolvedReference {
                index: 4,
                subject: "nobody".into(),
                target: "none".into(),
                missing: Side::Both,
            },
        ]
    );
}

#[test]
fn duplicate_partner_statements_yield_one_partnership() {
    let once = build(&input(
        vec![person("a", Sex::Female), person("b", Sex::Male)],
        vec![partner("a", "b")],
    ));
    let thrice = build(&input(
        vec![person("a", Sex::Female), person("b", Sex::Male)],
        vec![partner("a", "b"), partner("b", "a"), kin("a", "HUSB", "b")],
    ));
    assert_eq!(once.graph, thrice.graph);
    assert_eq!(thrice.summary().partnership_nodes, 1);
}

#[test]
fn repeated_builds_are_identical() {
    let family = input(
        vec![
            person("a", Sex::Female),
            person("b", Sex::Male),
            person("c", Sex::Female),
            person("d", Sex::Male),
            person("e", Sex::Unknown),
        ],
        vec![
            partner("a", "b"),
            mother("c", "a"),
            father("c", "b"),
            partner("c", "d"),
            mother("e", "c"),
            father("e", "d"),
            father("e", "stranger"),
        ],
    );
    let first = build(&family);
    for _ in 0..5 {
        assert_eq!(build(&family), first);
    }
}
