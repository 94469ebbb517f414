use rank_skiplist::SkipList;

fn main() {
    // Make a new skiplist
    let mut sk = SkipList::new();
    for i in &[3u32, 2, 4, 1] {
        // Inserts are O(log(n)) on average
        sk.insert(*i);
    }
    // You can print the skiplist, widths included!
    dbg!(&sk);
    // Lookup by value or by rank, both O(log(n))
    assert!(sk.contains(&1));
    assert_eq!(sk.at(2), Ok(&3));
    assert_eq!(sk.delete_at(0), Ok(1));
    assert!(!sk.contains(&1));
}
