//! Saving then loading must rebuild the same tree, for any growth history.

use std::sync::Arc;

use rstest::rstest;
use tempfile::TempDir;

use animal_game::application::services::KnowledgeService;
use animal_game::domain::{Branch, KnowledgeBase, KnowledgeNode, Slot, TreeNodeConvert};
use animal_game::infrastructure::traits::RealFileSystem;
use animal_game::util::testing;

use animal_game::domain::Branch::{No as N, Yes as Y};

/// Follow `path` from the root to an animal and grow there.
fn grow_at(kb: &mut KnowledgeBase, path: &[Branch], animal: &str, question: &str) {
    let mut current = kb.root();
    let mut slot = Slot::Root;
    for &branch in path {
        if kb.node(current).unwrap().is_animal() {
            break;
        }
        slot = Slot::Child {
            parent: current,
            branch,
        };
        current = kb.child(current, branch).unwrap();
    }
    // the path may stop at a question; keep answering No down to an animal
    let (_, slot) = kb.rightmost_leaf(current, slot).unwrap();
    kb.grow(slot, animal, question).unwrap();
}

fn build(growths: &[&[Branch]]) -> KnowledgeBase {
    let mut kb = KnowledgeBase::new("cat");
    for (i, path) in growths.iter().enumerate() {
        grow_at(
            &mut kb,
            path,
            &format!("animal{i}"),
            &format!("Question {i}?"),
        );
    }
    kb
}

/// Every answer sequence as long as the tree is deep.
fn all_paths(depth: usize) -> Vec<Vec<Branch>> {
    (0..1usize << depth)
        .map(|bits| {
            (0..depth)
                .map(|i| if bits & (1 << i) != 0 { Y } else { N })
                .collect()
        })
        .collect()
}

fn shape(kb: &KnowledgeBase) -> String {
    kb.to_tree_string().to_string()
}

fn round_trip(kb: KnowledgeBase) -> KnowledgeBase {
    let content = KnowledgeService::transcript(kb).unwrap();
    let mut loaded = KnowledgeBase::new("cat");
    KnowledgeService::replay(&mut loaded, content).unwrap();
    loaded
}

#[rstest]
#[case::seed_only(&[])]
#[case::single(&[&[] as &[Branch]])]
#[case::no_chain(&[&[] as &[Branch], &[N], &[N, N], &[N, N, N]])]
#[case::yes_chain(&[&[] as &[Branch], &[Y], &[Y, Y], &[Y, Y, Y]])]
#[case::zigzag(&[&[] as &[Branch], &[Y], &[Y, N], &[Y, N, Y], &[Y, N, Y, N]])]
#[case::balanced(&[&[] as &[Branch], &[Y], &[N], &[Y, Y], &[Y, N], &[N, Y], &[N, N]])]
#[case::deep_no_under_yes(&[&[] as &[Branch], &[Y], &[Y, N], &[Y, N, N], &[N], &[N, Y]])]
fn given_grown_tree_when_saved_and_loaded_then_same_routes(#[case] growths: &[&[Branch]]) {
    testing::init_test_setup();
    let original = build(growths);
    let expected_shape = shape(&original);
    let depth = original.depth();
    let expected: Vec<String> = all_paths(depth)
        .into_iter()
        .map(|p| original.resolve(p).unwrap().to_string())
        .collect();

    let loaded = round_trip(original);

    assert_eq!(shape(&loaded), expected_shape);
    assert_eq!(loaded.depth(), depth);
    for (path, animal) in all_paths(depth).into_iter().zip(expected) {
        assert_eq!(loaded.resolve(path.clone()).unwrap(), animal, "path {path:?}");
    }
}

#[test]
fn given_many_growth_histories_when_round_tripped_then_transcript_is_stable() {
    testing::init_test_setup();
    // every history of four growths picking a target by a 2-bit path
    let targets: Vec<Vec<Branch>> = all_paths(2);
    for a in &targets {
        for b in &targets {
            for c in &targets {
                let growths: [&[Branch]; 4] = [&[], a, b, c];
                let first = KnowledgeService::transcript(build(&growths)).unwrap();
                let second = KnowledgeService::transcript(round_trip(build(&growths))).unwrap();
                assert_eq!(first, second, "history {a:?} {b:?} {c:?}");
            }
        }
    }
}

#[test]
fn given_saved_file_when_loaded_twice_then_second_save_is_identical() {
    testing::init_test_setup();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("knowledge.txt");
    let svc = KnowledgeService::new(Arc::new(RealFileSystem));

    svc.save(&path, build(&[&[], &[Y], &[N], &[Y, N], &[N, N, N]]))
        .unwrap();
    let first = std::fs::read_to_string(&path).unwrap();

    let kb = svc.load(&path, "cat").unwrap();
    svc.save(&path, kb).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), first);
}

#[test]
fn given_loaded_tree_then_seed_is_rightmost_leaf() {
    let kb = round_trip(build(&[&[], &[N], &[N, N]]));
    let (leaf, _) = kb.rightmost_leaf(kb.root(), Slot::Root).unwrap();
    assert!(matches!(
        kb.node(leaf).unwrap(),
        KnowledgeNode::Animal { name } if name == "cat"
    ));
}
