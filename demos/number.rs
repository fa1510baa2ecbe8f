mod common;
use common::rand_u;
use regen_lib::Pattern;

fn main() {
    // a signed decimal with up to 16 integer and 6 fractional digits
    let pattern: Pattern = "[-+]?[0-9]{1,16}[.][0-9]{1,6}".parse().unwrap();

    let mut buf = [0; 4096];
    let mut u = rand_u(&mut buf);
    let number: String = pattern.generate(&mut u).unwrap();
    println!("{}", number);
}
