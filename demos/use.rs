use balanced_dict::{AvlTree, BulkOp, Dictionary, OrderedSet, RedBlackTree, Strategy};

fn main() {
    let mut avl = AvlTree::new();
    for word in ["zero", "one", "two", "two", "three", "four", "five"] {
        avl.insert(word);
    }
    assert!(avl.contains(&"one"));
    avl.remove(&"one");
    assert!(!avl.contains(&"one"));
    println!("AVL height {} for {} words", avl.height(), avl.len());

    let rb: RedBlackTree<i32> = (0..5).collect();
    print!("{{ ");
    for x in &rb {
        print!("{x}, ");
    }
    println!("}}");

    let mut dictionary = Dictionary::new(Strategy::RedBlack);
    let outcome = dictionary.apply(["apple", "pear", "apple"].map(String::from), BulkOp::Insert);
    println!(
        "{} inserted, {} duplicates, size {}",
        outcome.succeeded,
        outcome.rejected,
        dictionary.size()
    );
}
