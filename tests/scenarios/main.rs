mod assets;
mod boundary;
mod navigation;
mod registry;

use portfolio_shell::VERSION;

#[test]
fn scenarios_binary_smoke_runs() {
    assert!(VERSION.starts_with("portfolio-shell "));
}
