//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - Grover amplitude amplification experiments",
        style("grover-sim").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  grover-ir           Circuit representation and text diagrams");
    println!("  grover-hal          Backend abstraction");
    println!("  grover-adapter-sim  Local statevector simulator");
    println!("  grover-search       Oracle, diffuser, executor and iteration search");
    println!("  grover-cli          Command-line interface");
    println!();
    println!("License: {}", style("Apache-2.0").dim());
}
