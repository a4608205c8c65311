// demos/pricing_demo.rs

//! Prices the textbook at-the-money option and prints every Greek under both
//! put delta conventions.
//!
//! Usage:
//!     cargo run --example pricing_demo

use anyhow::Result;
use bs_surface::{price_with, PricingInputs, PutDeltaConvention};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Black-Scholes Pricing Demo");
    println!("==========================");

    let inputs = PricingInputs::new(1.0, 100.0, 100.0, 0.2, 0.05)?;
    println!(
        "T = {}y  K = {}  S = {}  sigma = {:.0}%  r = {:.0}%",
        inputs.time_to_maturity(),
        inputs.strike(),
        inputs.current_price(),
        inputs.volatility() * 100.0,
        inputs.interest_rate() * 100.0
    );

    for convention in [PutDeltaConvention::Compat, PutDeltaConvention::Textbook] {
        let out = price_with(&inputs, convention)?;
        println!("\nPut delta convention: {:?}", convention);
        println!("  {:<10} {:>12} {:>12}", "", "call", "put");
        println!("  {:<10} {:>12.4} {:>12.4}", "price", out.call_price, out.put_price);
        println!("  {:<10} {:>12.4} {:>12.4}", "delta", out.call_delta, out.put_delta);
        println!("  {:<10} {:>12.6} {:>12.6}", "gamma", out.call_gamma, out.put_gamma);
        println!("  {:<10} {:>12.4} {:>12.4}", "vega", out.vega, out.vega);
        println!("  {:<10} {:>12.4} {:>12.4}", "theta", out.call_theta, out.put_theta);
        println!("  {:<10} {:>12.4} {:>12.4}", "rho", out.call_rho, out.put_rho);
    }

    println!("\nOut-of-domain inputs are rejected:");
    match PricingInputs::new(0.0, 100.0, -5.0, 0.2, 0.05) {
        Ok(_) => println!("  unexpectedly accepted"),
        Err(e) => println!("  {}", e),
    }

    Ok(())
}
