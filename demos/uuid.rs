mod common;
use common::rand_u;
use regen_lib::Pattern;

fn main() {
    let pattern: Pattern = "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{8}"
        .parse()
        .unwrap();

    let mut buf = [0; 4096];
    let mut u = rand_u(&mut buf);
    let id: String = pattern.generate(&mut u).unwrap();
    println!("{}", id);
}
