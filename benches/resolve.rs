//! Benchmarks for per-key resolution
//!
//! Run with: cargo bench resolve

use bext::config::Settings;
use bext::keymap::{build_root_keymap, Action, Keymap, Resolver};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

fn default_resolver() -> Resolver {
    Resolver::new(build_root_keymap(&Settings::defaults().keybindings()))
}

/// A keymap `depth` levels deep, every level bound under "k"
fn nested_keymap(depth: usize) -> Keymap {
    let mut action = Action::command("leaf");
    for _ in 0..depth {
        action = Action::keymap([("k", action)]);
    }
    [("k".to_string(), action)].into_iter().collect()
}

// ============================================================================
// Resolution
// ============================================================================

#[divan::bench]
fn single_command(bencher: divan::Bencher) {
    let mut resolver = default_resolver();
    let never = || false;
    bencher.bench_local(|| divan::black_box(resolver.handle_key(divan::black_box("J"), &never)));
}

#[divan::bench]
fn branch_while_selecting(bencher: divan::Bencher) {
    let mut resolver = default_resolver();
    let always = || true;
    bencher.bench_local(|| divan::black_box(resolver.handle_key(divan::black_box("j"), &always)));
}

#[divan::bench]
fn two_key_sequence(bencher: divan::Bencher) {
    let mut resolver = default_resolver();
    let never = || false;
    bencher.bench_local(|| {
        resolver.handle_key("g", &never);
        divan::black_box(resolver.handle_key("g", &never))
    });
}

#[divan::bench(args = [1, 8, 64])]
fn deep_sequence(bencher: divan::Bencher, depth: usize) {
    let mut resolver = Resolver::new(nested_keymap(depth));
    let never = || false;
    bencher.bench_local(|| {
        for _ in 0..=depth {
            divan::black_box(resolver.handle_key("k", &never));
        }
    });
}

// ============================================================================
// Validation
// ============================================================================

#[divan::bench]
fn build_default_keymap(bencher: divan::Bencher) {
    let entries = Settings::defaults().keybindings();
    bencher.bench(|| divan::black_box(build_root_keymap(divan::black_box(&entries))));
}
