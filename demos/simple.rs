/// Run this example with cargo run --example simple
use rank_skiplist::SkipList;

#[derive(Debug)]
struct Process {
    pid: u32,
    niceness: i32,
}

fn main() {
    let mut sk: SkipList<u32> = (0..3).collect();

    // print the skiplist
    // warning: this prints every level, so roughly 2 * sk.len() hops
    println!("{:?}", sk);

    // Test association
    if sk.contains(&0) {
        println!("It contains 0!");
    }
    if !sk.contains(&99) {
        println!("It doesn't contain 99 :C");
    }
    // Insert and remove elements
    if sk.insert(99).is_none() {
        println!("... it now contains 99 🎉");
    }
    // Elements are unique, an equal insert replaces
    if sk.insert(99).is_some() {
        println!("... 99 was replaced, not duplicated");
    }

    if sk.delete(&99).is_some() {
        println!("... I removed 99");
    }

    // Access by rank
    sk.insert(100);
    sk.insert(200);
    dbg!(sk.at(3), sk.index_of(&200));
    dbg!(sk.delete_at(1));
    dbg!(sk.at(10));

    // We can check how many elements are in the skiplist
    dbg!(sk.len(), sk.is_empty());

    // Custom orders work through closures, here as a priority queue
    let mut queue = SkipList::with_comparator(|a: &Process, b: &Process| {
        a.niceness.cmp(&b.niceness)
    });
    queue.insert(Process { pid: 1, niceness: -20 });
    queue.insert(Process { pid: 2, niceness: 0 });
    queue.insert(Process { pid: 3, niceness: 10 });
    queue.insert(Process { pid: 4, niceness: -1 });
    while let Some(p) = queue.pop_first() {
        println!("start process {} with niceness {}", p.pid, p.niceness);
    }

    // A reversed copy of a big skiplist
    let sk: SkipList<u32> = (0..1000).collect();
    let rev = sk.reversed();
    dbg!((rev.at(0), sk.at(0)));

    // Lets iterate over all of them, with ranks
    let top: Vec<_> = rev.iter().enumerate().take(5).collect();
    dbg!(top);
}
