#![no_main]

use std::io::{self, Read};

use libfuzzer_sys::fuzz_target;
use catrs::{ByteSource, CatConfig, FormatOptions, Transformer};

/// Hands out at most `step` bytes per read.
struct Trickle<'a> {
    data: &'a [u8],
    step: usize,
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.step.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

impl ByteSource for Trickle<'_> {}

fuzz_target!(|input: (u8, u8, u8, Vec<u8>)| {
    let (flags, step, size, data) = input;

    let options = FormatOptions::new()
        .with_show_nonprinting(flags & 1 != 0)
        .with_show_tabs(flags & 2 != 0)
        .with_show_ends(flags & 4 != 0)
        .with_number(flags & 8 != 0)
        .with_number_nonblank(flags & 16 != 0)
        .with_squeeze_blank(flags & 32 != 0);

    let mut reference = Vec::new();
    let mut cat = Transformer::new(CatConfig::default().with_options(options));
    cat.transform(&mut &data[..], &mut reference).unwrap();
    cat.finish(&mut reference).unwrap();

    // Tiny buffers and short reads must not change the output
    let size = usize::from(size).max(1);
    let config = CatConfig::new(size, size).unwrap().with_options(options);
    let mut source = Trickle {
        data: &data,
        step: usize::from(step).max(1),
    };

    let mut out = Vec::new();
    let mut cat = Transformer::new(config);
    cat.transform(&mut source, &mut out).unwrap();
    cat.finish(&mut out).unwrap();

    assert_eq!(out, reference);
});
