use rank_skiplist::{Natural, Options, SkipList};

#[global_allocator]
static ALLOCATOR: checkers::Allocator = checkers::Allocator::system();

#[checkers::test]
fn test_allocations() {
    let mut sk = SkipList::with_options(Natural, Options::default().seed(42));
    let _: Vec<u32> = sk.iter().cloned().collect();
    let _ = sk.at(0);
    let _ = sk.delete_at(0);

    for i in 0..50u32 {
        sk.insert(i);
    }
    sk.contains(&13);
    let _: Vec<u32> = sk.iter().cloned().collect();
    let _ = sk.at(1);
    let _ = sk.index_of(&1);
    let _ = sk.delete_at(10);
    let _ = sk.delete(&20);
    let _ = sk.update_at(5, 5);
    let _ = sk.pop_first();
    let _ = sk.pop_last();
    // freed slots get reused
    sk.insert(20);
    sk.insert(10);
    let rev = sk.reversed();
    let _: Vec<u32> = rev.into_iter().collect();
}

#[checkers::test]
fn test_owned_values_released() {
    let mut sk = SkipList::with_options(Natural, Options::default().seed(7));
    for i in 0..100u32 {
        sk.insert(format!("value-{:03}", i));
    }
    // overwriting an equal element drops the old one
    sk.insert("value-050".to_string());
    for i in (0..100).step_by(3) {
        sk.delete(&format!("value-{:03}", i));
    }
    while sk.len() > 10 {
        let _ = sk.delete_at(sk.len() / 2);
    }
    let back = sk.into_reversed();
    let mut it = back.into_iter();
    let _ = it.next();
    // dropping a partly consumed iterator frees the rest
    drop(it);
}
