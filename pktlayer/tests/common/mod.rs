use std::{fs::File, io::Read};

fn read_example(fname: &str) -> String {
    // The test is executed under the crate root directory.
    let mut program_path = std::env::current_dir().unwrap();
    program_path.push("tests");
    program_path.push("packet_examples");
    program_path.push(fname);

    let mut file = File::open(program_path).unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    content.split_whitespace().collect()
}

/// Load a hex dump from `tests/packet_examples`. Whitespace between the
/// digits is ignored.
pub fn file_to_packet(fname: &str) -> Vec<u8> {
    let content = read_example(fname);
    assert!(content.len() % 2 == 0, "odd number of hex digits in {fname}");

    (0..content.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&content[i..i + 2], 16).unwrap())
        .collect()
}
