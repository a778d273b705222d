use mota_uri::cli::UriArgs;

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    mota_logger::init();

    let args = UriArgs::from_env()?;
    let output = args.run()?;
    println!("{output}");
    Ok(())
}
