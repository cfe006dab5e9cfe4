#![no_main]

use libfuzzer_sys::fuzz_target;
use catrs::{CatConfig, FormatOptions, Transformer};

fuzz_target!(|data: Vec<u8>| {
    // No options: output is the input
    let mut cat = Transformer::default();
    let out = cat.transform_bytes(data.clone()).unwrap();
    assert_eq!(&out[..], &data[..]);

    // Every option at once, fed whole and then split in two
    let options = FormatOptions::show_all()
        .with_number(true)
        .with_squeeze_blank(true);
    let config = CatConfig::default().with_options(options);

    let mut whole = Vec::new();
    let mut cat = Transformer::new(config);
    cat.transform(&mut &data[..], &mut whole).unwrap();
    cat.finish(&mut whole).unwrap();

    let mid = data.len() / 2;
    let mut split = Vec::new();
    let mut cat = Transformer::new(config);
    cat.transform(&mut &data[..mid], &mut split).unwrap();
    cat.transform(&mut &data[mid..], &mut split).unwrap();
    cat.finish(&mut split).unwrap();

    assert_eq!(whole, split);
});
