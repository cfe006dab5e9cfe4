// Integration tests for the Transformer streaming API
// Tests cover: option semantics, chunk-boundary invariance, state carried
// across inputs, line-number growth, error reporting and flushing

use std::io::{self, Cursor, Read, Write};

use catrs::{
    BlankRun, ByteSource, CatConfig, CatError, FormatOptions, LineNumber, Transformer, notation,
};

// ============================================================================
// Helpers
// ============================================================================

fn transformer(opts: FormatOptions, input_size: usize, output_size: usize) -> Transformer {
    Transformer::new(CatConfig::new(input_size, output_size).unwrap().with_options(opts))
}

/// Runs a whole session over `inputs` and returns everything written.
fn session(opts: FormatOptions, input_size: usize, output_size: usize, inputs: &[&[u8]]) -> Vec<u8> {
    let mut cat = transformer(opts, input_size, output_size);
    let mut out = Vec::new();
    for input in inputs {
        cat.transform(&mut &input[..], &mut out).unwrap();
    }
    cat.finish(&mut out).unwrap();
    out
}

fn cat(opts: FormatOptions, input: &[u8]) -> Vec<u8> {
    session(opts, 4096, 4096, &[input])
}

/// Hands out at most `step` bytes per read and never reports availability.
struct Trickle<'a> {
    data: &'a [u8],
    step: usize,
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.step).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

impl ByteSource for Trickle<'_> {}

/// Yields its data, then fails.
struct FailAfter<'a> {
    data: &'a [u8],
}

impl Read for FailAfter<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return Err(io::Error::other("device lost"));
        }
        self.data.read(buf)
    }
}

impl ByteSource for FailAfter<'_> {}

/// Counts queries of the availability hint, which it does not support.
struct NoHint<'a> {
    data: &'a [u8],
    queries: usize,
}

impl Read for NoHint<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.data.read(buf)
    }
}

impl ByteSource for NoHint<'_> {
    fn available(&mut self) -> io::Result<usize> {
        self.queries += 1;
        Err(io::ErrorKind::Unsupported.into())
    }
}

/// Fails every availability query with a real error.
struct BadHint;

impl Read for BadHint {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Ok(0)
    }
}

impl ByteSource for BadHint {
    fn available(&mut self) -> io::Result<usize> {
        Err(io::ErrorKind::PermissionDenied.into())
    }
}

/// Records every write call.
#[derive(Default)]
struct Recorder {
    data: Vec<u8>,
    writes: usize,
}

impl Write for Recorder {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writes += 1;
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Accepts one byte per call, then breaks after `budget` bytes.
struct Narrow {
    data: Vec<u8>,
    budget: usize,
}

impl Write for Narrow {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.data.len() >= self.budget {
            return Err(io::ErrorKind::BrokenPipe.into());
        }
        self.data.push(buf[0]);
        Ok(1)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ============================================================================
// Concrete Scenarios
// ============================================================================

#[test]
fn test_all_options_off_is_identity() {
    assert_eq!(cat(FormatOptions::new(), b"Hello\nWorld\n"), b"Hello\nWorld\n");
}

#[test]
fn test_show_tabs_only() {
    let opts = FormatOptions::new().with_show_tabs(true);
    assert_eq!(cat(opts, b"a\tb\n\t\n"), b"a^Ib\n^I\n");
}

#[test]
fn test_squeeze_blank_only() {
    let opts = FormatOptions::new().with_squeeze_blank(true);
    assert_eq!(cat(opts, b"a\n\n\n\nb\n"), b"a\n\nb\n");
}

#[test]
fn test_numbering_options_on_blank_only_input() {
    let opts = FormatOptions::new()
        .with_number(true)
        .with_number_nonblank(true)
        .with_squeeze_blank(true);
    assert_eq!(cat(opts, b"\n\n\n"), b"\n");
}

#[test]
fn test_leading_blank_line_is_numbered() {
    let opts = FormatOptions::new().with_number(true);
    assert_eq!(cat(opts, b"\n"), b"     1\t\n");
}

#[test]
fn test_squeeze_with_number_and_ends() {
    let opts = FormatOptions::new()
        .with_number(true)
        .with_squeeze_blank(true)
        .with_show_ends(true);
    assert_eq!(
        cat(opts, b"x\n\n\n\ny"),
        b"     1\tx$\n     2\t$\n     3\ty".to_vec()
    );
}

// ============================================================================
// Chunk Boundaries
// ============================================================================

#[test]
fn test_identity_for_every_small_chunking() {
    let data: Vec<u8> = (0..=255u8).cycle().take(700).collect();
    for input_size in 1..=8 {
        for output_size in 1..=8 {
            let out = session(FormatOptions::new(), input_size, output_size, &[&data]);
            assert_eq!(out, data, "input_size={input_size} output_size={output_size}");
        }
    }
}

#[test]
fn test_squeeze_independent_of_run_length_and_chunking() {
    let opts = FormatOptions::new().with_squeeze_blank(true);
    for k in 2..12 {
        let mut data = b"top".to_vec();
        data.extend(std::iter::repeat_n(b'\n', k));
        data.extend_from_slice(b"end\n");

        for input_size in [1, 2, 3, 5, 4096] {
            let out = session(opts, input_size, 3, &[&data]);
            assert_eq!(out, b"top\n\nend\n", "k={k} input_size={input_size}");
        }
    }
}

#[test]
fn test_crlf_split_at_read_boundary() {
    let opts = FormatOptions::new().with_show_ends(true);
    let whole = cat(opts, b"ab\r\ncd\n");
    assert_eq!(whole, b"ab^M$\ncd$\n");

    // "ab\r" | "\ncd" | "\n"
    let split = session(opts, 3, 4096, &[b"ab\r\ncd\n"]);
    assert_eq!(split, whole);
}

#[test]
fn test_lone_cr_at_read_boundary() {
    let opts = FormatOptions::new().with_show_ends(true);
    let split = session(opts, 3, 4096, &[b"ab\rcd\n"]);
    assert_eq!(split, b"ab\rcd$\n");
}

#[test]
fn test_short_reads_match_single_read() {
    let data = b"one\r\n\r\n\ttwo\x01\r\n\n\n\nthree\xff\r";
    let variants = [
        FormatOptions::new().with_show_ends(true),
        FormatOptions::show_all(),
        FormatOptions::new()
            .with_number(true)
            .with_squeeze_blank(true)
            .with_show_ends(true),
        FormatOptions::tabs_nonprinting().with_number_nonblank(true),
    ];

    for opts in variants {
        let expected = cat(opts, data);
        for step in 1..=5 {
            let mut cat = transformer(opts, 4096, 2);
            let mut out = Vec::new();
            cat.transform(&mut Trickle { data, step }, &mut out).unwrap();
            cat.finish(&mut out).unwrap();
            assert_eq!(out, expected, "step={step} opts={opts:?}");
        }
    }
}

#[test]
fn test_long_line_with_tiny_buffers() {
    let opts = FormatOptions::show_all().with_number(true);
    let line = vec![0x80u8; 300];
    let out = session(opts, 1, 1, &[&line]);

    let mut expected = b"     1\t".to_vec();
    for _ in 0..300 {
        expected.extend_from_slice(b"M-^@");
    }
    assert_eq!(out, expected);
}

// ============================================================================
// Numbering
// ============================================================================

#[test]
fn test_nth_line_gets_label_n() {
    let opts = FormatOptions::new().with_number(true);
    let mut data = Vec::new();
    for i in 0..1500 {
        if i % 7 == 0 {
            data.push(b'\n');
        } else {
            data.extend_from_slice(format!("line {i}\n").as_bytes());
        }
    }

    let out = session(opts, 64, 64, &[&data]);
    for (n, line) in out.split(|&b| b == b'\n').filter(|l| !l.is_empty()).enumerate() {
        let label = format!("{:>6}\t", n + 1);
        assert!(line.starts_with(label.as_bytes()), "line {} lacks label", n + 1);
    }
}

#[test]
fn test_nonblank_label_counts_nonblank_lines() {
    let opts = FormatOptions::new().with_number_nonblank(true);
    let out = cat(opts, b"a\n\n\nb\n\nc\n");
    assert_eq!(out, b"     1\ta\n\n\n     2\tb\n\n     3\tc\n".to_vec());
}

#[test]
fn test_label_growth_keeps_earlier_lines() {
    let opts = FormatOptions::new().with_number(true);
    let mut cat = transformer(opts, 4096, 4096).with_line_number(LineNumber::starting_at(999_997).unwrap());

    let out = cat.transform_bytes(&b"a\nb\nc\n"[..]).unwrap();
    assert_eq!(&out[..], b"999998\ta\n999999\tb\n1000000\tc\n");
}

#[test]
fn test_label_overflow_marker_in_output() {
    let opts = FormatOptions::new().with_number(true);
    let max = 10u64.pow(catrs::MAX_DIGITS as u32) - 1;
    let mut cat = transformer(opts, 4096, 4096).with_line_number(LineNumber::starting_at(max - 1).unwrap());

    let out = cat.transform_bytes(&b"a\nb\nc\n"[..]).unwrap();
    assert_eq!(
        &out[..],
        b"999999999999999999\ta\n>00000000000000000\tb\n>00000000000000001\tc\n"
    );
    assert!(cat.line_number().is_overflowed());
}

#[test]
fn test_wide_labels_on_blank_and_content_lines_with_small_output() {
    let opts = FormatOptions::new().with_number(true).with_show_ends(true);
    let start = LineNumber::starting_at(10u64.pow(17)).unwrap();
    let mut cat = transformer(opts, 4096, 3).with_line_number(start);

    let out = cat.transform_bytes(&b"x\r\n\ny\n"[..]).unwrap();
    assert_eq!(
        &out[..],
        b"100000000000000001\tx^M$\n100000000000000002\t$\n100000000000000003\ty$\n"
    );
}

// ============================================================================
// State Across Inputs
// ============================================================================

#[test]
fn test_line_split_across_inputs_numbered_once() {
    let opts = FormatOptions::new().with_number(true);
    let out = session(opts, 4096, 4096, &[b"a", b"b\nc\n"]);
    assert_eq!(out, b"     1\tab\n     2\tc\n".to_vec());
}

#[test]
fn test_blank_run_across_inputs_squeezed() {
    let opts = FormatOptions::new().with_squeeze_blank(true);
    let out = session(opts, 4096, 4096, &[b"a\n\n", b"\n\n", b"\nb\n"]);
    assert_eq!(out, b"a\n\nb\n");
}

#[test]
fn test_crlf_split_across_inputs() {
    let opts = FormatOptions::new().with_show_ends(true);
    assert_eq!(session(opts, 4096, 4096, &[b"a\r", b"\nb\n"]), b"a^M$\nb$\n");
    assert_eq!(session(opts, 4096, 4096, &[b"a\r", b"b\n"]), b"a\rb$\n");
}

#[test]
fn test_state_after_input() {
    let mut cat = transformer(FormatOptions::new().with_number(true), 4096, 4096);

    cat.transform_bytes(&b"x"[..]).unwrap();
    assert_eq!(cat.state().blank_run, BlankRun::MidLine);

    cat.transform_bytes(&b"\n\n"[..]).unwrap();
    assert_eq!(cat.state().blank_run, BlankRun::Single);
    assert_eq!(cat.line_number().digits(), b"2");
}

// ============================================================================
// Quoting
// ============================================================================

#[test]
fn test_every_byte_quoted_deterministically() {
    let opts = FormatOptions::new().with_show_nonprinting(true);
    let data: Vec<u8> = (0..=255u8).filter(|&b| b != b'\n').collect();

    let mut expected = Vec::new();
    for &b in &data {
        if b == b'\t' {
            expected.push(b'\t');
        } else {
            expected.extend_from_slice(notation(b).as_bytes());
        }
    }

    assert_eq!(cat(opts, &data), expected);
    assert_eq!(session(opts, 1, 1, &[&data]), expected);
}

#[test]
fn test_show_tabs_inside_quoting() {
    let opts = FormatOptions::tabs_nonprinting();
    assert_eq!(cat(opts, b"\t\x89"), b"^IM-^I");
}

// ============================================================================
// Errors and Flushing
// ============================================================================

#[test]
fn test_read_failure_flushes_and_preserves_state() {
    let opts = FormatOptions::new().with_number(true);
    let mut cat = transformer(opts, 2, 4096);
    let mut out = Vec::new();

    let err = cat
        .transform(&mut FailAfter { data: b"abc\nde" }, &mut out)
        .unwrap_err();
    assert!(matches!(err, CatError::Read(_)));
    assert!(!err.is_fatal());
    assert_eq!(out, b"     1\tabc\n     2\tde");

    cat.transform(&mut &b"f\ng\n"[..], &mut out).unwrap();
    assert_eq!(out, b"     1\tabc\n     2\tdef\n     3\tg\n".to_vec());
}

#[test]
fn test_write_failure_is_fatal() {
    let opts = FormatOptions::new().with_show_ends(true);
    let mut cat = transformer(opts, 8, 4);
    let mut sink = Narrow {
        data: Vec::new(),
        budget: 5,
    };

    let err = cat
        .transform(&mut &b"0123456789\n"[..], &mut sink)
        .unwrap_err();
    assert!(matches!(err, CatError::Write(_)));
    assert!(err.is_fatal());
    assert_eq!(sink.data, b"01234");
}

#[test]
fn test_partial_writes_are_completed() {
    let opts = FormatOptions::new().with_show_ends(true);
    let mut cat = transformer(opts, 3, 5);
    let mut sink = Narrow {
        data: Vec::new(),
        budget: usize::MAX,
    };

    cat.transform(&mut &b"abc\ndef\n"[..], &mut sink).unwrap();
    assert_eq!(sink.data, b"abc$\ndef$\n");
}

#[test]
fn test_unsupported_hint_asked_once() {
    let opts = FormatOptions::new().with_show_ends(true);
    let mut cat = transformer(opts, 2, 4096);
    let mut src = NoHint {
        data: b"abcdefgh\n",
        queries: 0,
    };
    let mut sink = Recorder::default();

    cat.transform(&mut src, &mut sink).unwrap();
    assert_eq!(src.queries, 1);
    assert_eq!(sink.data, b"abcdefgh$\n");
    // Flushed before every blocking read once the hint is gone.
    assert!(sink.writes > 1);
}

#[test]
fn test_available_input_defers_flush() {
    let opts = FormatOptions::new().with_show_ends(true);
    let mut cat = transformer(opts, 2, 4096);
    let mut sink = Recorder::default();

    cat.transform(&mut Cursor::new(&b"abcdefgh\n"[..]), &mut sink).unwrap();
    assert_eq!(sink.data, b"abcdefgh$\n");
    assert_eq!(sink.writes, 1);
}

#[test]
fn test_hint_failure_is_read_failure() {
    let mut cat = transformer(FormatOptions::new().with_number(true), 16, 16);
    let mut out = Vec::new();
    let err = cat.transform(&mut BadHint, &mut out).unwrap_err();
    assert!(matches!(err, CatError::Read(_)));
}

#[test]
fn test_zero_output_size_is_rejected() {
    let config = CatConfig::default()
        .with_options(FormatOptions::new().with_number(true))
        .with_output_size(0);
    let mut cat = Transformer::new(config);

    let err = cat.transform_bytes(&b"a\n"[..]).unwrap_err();
    assert!(matches!(err, CatError::InvalidConfig { .. }));
    assert!(!err.is_fatal());
}

#[test]
fn test_zero_input_size_is_rejected_before_reading() {
    let mut cat = Transformer::new(CatConfig::default().with_input_size(0));
    let mut src: &[u8] = b"kept\n";
    let mut out = Vec::new();

    let err = cat.transform(&mut src, &mut out).unwrap_err();
    assert!(matches!(err, CatError::InvalidConfig { .. }));
    assert_eq!(src, b"kept\n");
    assert!(out.is_empty());
}
