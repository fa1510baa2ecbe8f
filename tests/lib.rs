use arbitrary::Unstructured;
use rand::RngCore;
use regen_lib::{Captures, Pattern};

fn rand_u<'a>(buf: &'a mut [u8]) -> Unstructured<'a> {
    let mut rng = rand::rng();
    rng.fill_bytes(buf);
    Unstructured::new(buf)
}

#[test]
fn deterministic_for_same_entropy() {
    let pattern: Pattern = "(1[0-2]|0[1-9])(:[0-5][0-9]){2} (A|P)M".parse().unwrap();

    let seed = b"qwertyqwertyqwertyqwertyqwertyqwerty";
    let mut u = Unstructured::new(seed);
    let (text_old, id_old): (String, u64) = pattern.generate(&mut u).unwrap();
    for _ in 0..100 {
        u = Unstructured::new(seed);
        let (text, id): (String, u64) = pattern.generate(&mut u).unwrap();
        assert_eq!(text, text_old);
        assert_eq!(id, id_old);
    }
}

#[test]
fn tuple_same_as_no_tuple() {
    let pattern: Pattern = "[-+]?[0-9]{1,16}[.][0-9]{1,6}".parse().unwrap();

    for _ in 0..100 {
        let mut buf = [0; 4096];
        let mut u = rand_u(&mut buf);
        let pair: (String, String) = pattern.generate(&mut u).unwrap();
        assert_eq!(pair.0, pair.1);
    }

    for _ in 0..100 {
        let mut buf = [0; 64];
        let _ = rand_u(&mut buf);
        let mut u1 = Unstructured::new(&buf);
        let mut u2 = Unstructured::new(&buf);
        let mut u3 = Unstructured::new(&buf);
        let mut u4 = Unstructured::new(&buf);
        let text1: String = pattern.generate(&mut u1).unwrap();
        let id1: u64 = pattern.generate(&mut u2).unwrap();
        let (text2, id2): (String, u64) = pattern.generate(&mut u3).unwrap();
        let (id3, text3): (u64, String) = pattern.generate(&mut u4).unwrap();
        assert_eq!(text1, text2);
        assert_eq!(text1, text3);
        assert_eq!(id1, id2);
        assert_eq!(id1, id3);
    }
}

#[test]
fn bytes_agree_with_text() {
    let pattern: Pattern = "[0-9a-f]{8}-[0-9a-f]{4}".parse().unwrap();

    for _ in 0..100 {
        let mut buf = [0; 4096];
        let _ = rand_u(&mut buf);
        let mut u1 = Unstructured::new(&buf);
        let mut u2 = Unstructured::new(&buf);
        let text: String = pattern.generate(&mut u1).unwrap();
        let bytes: Vec<u8> = pattern.generate(&mut u2).unwrap();
        assert_eq!(text.as_bytes(), bytes.as_slice());
    }
}

#[test]
fn generated_strings_rematch_their_pattern() {
    let pattern: Pattern = "[0-9a-f]{8}-[0-9a-f]{4}".parse().unwrap();
    let checker = regex::Regex::new("^[0-9a-f]{8}-[0-9a-f]{4}$").unwrap();

    for _ in 0..1000 {
        let mut buf = [0; 4096];
        let mut u = rand_u(&mut buf);
        let text: String = pattern.generate(&mut u).unwrap();
        assert!(checker.is_match(&text), "{:?} does not re-match", text);
    }
}

#[test]
fn clock_pattern_rematches() {
    let pattern: Pattern = "(1[0-2]|0[1-9])(:[0-5][0-9]){2} (A|P)M".parse().unwrap();
    let checker = regex::Regex::new("^(1[0-2]|0[1-9])(:[0-5][0-9]){2} (A|P)M$").unwrap();

    for _ in 0..1000 {
        let mut buf = [0; 4096];
        let mut u = rand_u(&mut buf);
        let text: String = pattern.generate(&mut u).unwrap();
        assert!(checker.is_match(&text), "{:?} does not re-match", text);
    }
}

#[test]
fn meridiem_capture_scenario() {
    let pattern: Pattern = "(A|P)M".parse().unwrap();

    for _ in 0..200 {
        let mut buf = [0; 64];
        let mut u = rand_u(&mut buf);
        let (text, captures): (String, Captures) = pattern.generate(&mut u).unwrap();
        assert!(text == "AM" || text == "PM", "unexpected {:?}", text);
        assert_eq!(captures.len(), 1);
        let captured = captures.get(0).unwrap();
        assert!(captured == "A" || captured == "P");
        assert!(text.starts_with(captured));
    }
}

#[test]
fn untaken_branch_groups_get_no_slot() {
    let pattern: Pattern = "(a)|(b)".parse().unwrap();

    for _ in 0..100 {
        let mut buf = [0; 64];
        let mut u = rand_u(&mut buf);
        let (text, captures): (String, Captures) = pattern.generate(&mut u).unwrap();
        assert_eq!(captures.len(), 1);
        assert_eq!(captures.get(0), Some(text.as_str()));
    }
}

#[test]
fn repeated_group_keeps_last_capture() {
    let pattern: Pattern = "([ab]){2}".parse().unwrap();

    for _ in 0..100 {
        let mut buf = [0; 64];
        let mut u = rand_u(&mut buf);
        let (text, captures): (String, Captures) = pattern.generate(&mut u).unwrap();
        assert_eq!(text.len(), 2);
        assert_eq!(captures.len(), 1);
        assert_eq!(captures.get(0), Some(&text[1..]));
    }
}

#[test]
fn nested_groups_capture_in_visitation_order() {
    let pattern: Pattern = "((a)b)".parse().unwrap();
    let mut buf = [0; 64];
    let mut u = rand_u(&mut buf);
    let captures: Captures = pattern.generate(&mut u).unwrap();
    assert_eq!(
        captures.into_vec(),
        vec![Some("ab".to_string()), Some("a".to_string())]
    );
}

#[test]
fn negated_class_never_yields_members() {
    let pattern: Pattern = "[^0-9]{16}".parse().unwrap();

    for _ in 0..100 {
        let mut buf = [0; 4096];
        let mut u = rand_u(&mut buf);
        let text: String = pattern.generate(&mut u).unwrap();
        assert_eq!(text.len(), 16);
        for c in text.chars() {
            assert!((' '..='~').contains(&c));
            assert!(!c.is_ascii_digit());
        }
    }
}
