use bs_surface::{default_configs, PricingInputs, SweepConfig};

fn describe(name: &str, config: &SweepConfig, use_case: &str) {
    println!("{}:", name);
    println!("   Resolution: {0} x {0}", config.resolution);
    println!(
        "   Spot range: {:.0}% - {:.0}% of spot",
        config.spot_range.0 * 100.0,
        config.spot_range.1 * 100.0
    );
    println!(
        "   Volatility range: {:.0}% - {:.0}% of volatility",
        config.volatility_range.0 * 100.0,
        config.volatility_range.1 * 100.0
    );
    println!("   Output: {}", config.output);
    println!("   Parallel: {}", config.parallel);
    println!("   Use case: {}\n", use_case);
}

fn main() {
    println!("bs-surface Default Configuration Examples\n");

    describe(
        "1. Standard Configuration",
        &default_configs::standard(),
        "Interactive heatmaps",
    );
    describe(
        "2. Quick Configuration",
        &default_configs::quick(),
        "Previews, smoke tests",
    );
    describe(
        "3. High Resolution Configuration",
        &default_configs::high_resolution(),
        "Exported figures",
    );

    let inputs = match PricingInputs::new(1.0, 100.0, 100.0, 0.2, 0.05) {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("invalid inputs: {}", e);
            return;
        }
    };

    println!("Running quick sweep around the at-the-money option...");
    match default_configs::quick().run(inputs) {
        Ok(matrix) => {
            print!("{:>8}", "S \\ vol");
            for vol in matrix.column_values() {
                print!("{:>9.3}", vol);
            }
            println!();
            for (spot, row) in matrix.row_values().iter().zip(matrix.rows()) {
                print!("{:>8.1}", spot);
                for v in row {
                    print!("{:>9.4}", v);
                }
                println!();
            }
        }
        Err(e) => eprintln!("Sweep failed: {}", e),
    }
}
