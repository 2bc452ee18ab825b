// src/bin/forum_scrape.rs
fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    forum_scrape::cli::run()
}
