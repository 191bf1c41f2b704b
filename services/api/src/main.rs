use homelord_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("homelord error: {err}");
        std::process::exit(1);
    }
}
