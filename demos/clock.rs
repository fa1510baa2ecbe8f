mod common;
use common::rand_u;
use regen_lib::{Captures, Pattern};

fn main() {
    let pattern: Pattern = "(1[0-2]|0[1-9])(:[0-5][0-9]){2} (A|P)M".parse().unwrap();

    let mut buf = [0; 4096];
    let mut u = rand_u(&mut buf);
    let (time, captures): (String, Captures) = pattern.generate(&mut u).unwrap();
    println!("{}", time);
    for (i, group) in captures.iter().enumerate() {
        println!("  group {}: {:?}", i, group);
    }
}
