#![feature(test)]
extern crate test;
use realroot::{solve_real_roots, Poly, SturmChain};
use test::Bencher;

fn quartic_with_roots(x1: f64, x2: f64, x3: f64, x4: f64) -> Poly {
    let a = -(x1 + x2 + x3 + x4);
    let b = x1 * (x2 + x3) + x2 * (x3 + x4) + x4 * (x1 + x3);
    let c = -x1 * x2 * (x3 + x4) - x3 * x4 * (x1 + x2);
    let d = x1 * x2 * x3 * x4;
    Poly::new([d, c, b, a, 1.0])
}

#[bench]
fn bench_solve_quartic(bb: &mut Bencher) {
    let p = quartic_with_roots(1.0, 2.0, 3.0, 4.0);
    bb.iter(|| solve_real_roots(test::black_box(&p)))
}

#[bench]
fn bench_sturm_chain(bb: &mut Bencher) {
    let p = quartic_with_roots(1.0, 2.0, 3.0, 4.0);
    bb.iter(|| SturmChain::new(test::black_box(&p)))
}
