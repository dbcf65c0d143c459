#![no_main]
use std::collections::BTreeSet;

use bucketbits::Container;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|ops: Vec<(bool, u16)>| {
    let mut c = Container::new();
    let mut model = BTreeSet::new();

    for (insert, x) in ops {
        if insert {
            assert_eq!(c.insert(x), model.insert(x));
        } else {
            assert_eq!(c.remove(x), model.remove(&x));
        }
    }

    assert_eq!(c.len(), model.len());
    assert!(c.iter().eq(model.iter().copied()));

    if let Some(&last) = model.iter().next_back() {
        let k = model.len() - 1;
        assert_eq!(c.select1(k), last);
        assert_eq!(c.rank1(last as usize), k);
    }
});
