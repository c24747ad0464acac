use criterion::{black_box, criterion_group, criterion_main, Criterion};
use symtree_regex::{compile, matches, Expr};

fn sample_expr() -> Expr {
    // cat(0, plus(digit-or), 0): one 0, one or more digits, then a 0.
    let digit = Expr::or((0..=9).map(|d| Expr::literal(d.to_string())));
    Expr::cat([
        Expr::literal("0"),
        Expr::plus(digit),
        Expr::literal("0"),
    ])
}

pub fn compile_bench(c: &mut Criterion) {
    let expr = sample_expr();
    c.bench_function("compile", |b| b.iter(|| compile(black_box(&expr))));
}

pub fn match_bench(c: &mut Criterion) {
    let expr = sample_expr();
    let dfa = compile(&expr).unwrap();
    let query = format!("0{}0", "5".repeat(64));
    c.bench_function("match", |b| b.iter(|| matches(&dfa, black_box(&query))));
}

criterion_group!(benches, compile_bench, match_bench);
criterion_main!(benches);
