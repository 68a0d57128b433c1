fn main() -> anyhow::Result<()> {
    textract::cli::run_cli()
}
