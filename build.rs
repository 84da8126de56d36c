// Stamps the build time into `BUILD_DATE`, reported by `eurorack-panel --version`
// and exported as `eurorack_panel::BUILD_DATE`.
fn main() {
    let build_date = chrono::Utc::now()
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string();
    println!("cargo:rustc-env=BUILD_DATE={}", build_date);
}
