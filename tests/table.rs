use expminus::table::{Exp2Table, INDEX_MASK, TABLE_BITS, TABLE_LEN};

#[test]
fn test_table_shape() {
    let table = Exp2Table::get();
    assert_eq!(TABLE_LEN, 2048);
    assert_eq!(TABLE_BITS, 11);
    assert_eq!(INDEX_MASK, 0x7FF);
    assert_eq!(table.as_array().len(), TABLE_LEN);
    assert_eq!(table.lookup(TABLE_LEN as u32), table.lookup(0));
}

#[test]
fn test_table_matches_reference_within_one_ulp() {
    let table = Exp2Table::get();
    let mut max_ulps = 0u32;
    for k in 0..TABLE_LEN as u32 {
        let reference = (k as f64 / 2048.0).exp2();
        let actual = table.lookup(k);
        let ulp = f32::EPSILON as f64; // every entry is in [1, 2)
        let ulps = ((actual as f64 - reference).abs() / ulp).ceil() as u32;
        max_ulps = max_ulps.max(ulps);
        assert!(ulps <= 1, "k = {k}: {actual} vs {reference}");
    }
    println!("max table error: {max_ulps} ulp");
}

#[test]
fn test_regenerated_table_is_bit_identical() {
    let first = Exp2Table::generate();
    let second = Exp2Table::generate();
    for k in 0..TABLE_LEN {
        assert_eq!(
            first.as_array()[k].to_bits(),
            second.as_array()[k].to_bits()
        );
        assert_eq!(
            first.as_array()[k].to_bits(),
            Exp2Table::get().as_array()[k].to_bits()
        );
    }
}

#[test]
fn test_table_shared_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| Exp2Table::get().as_ptr() as usize))
        .collect();
    let expected = Exp2Table::get().as_ptr() as usize;
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
