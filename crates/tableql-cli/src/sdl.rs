use anyhow::Result;
use tableql::Db;

pub(crate) fn run(db: &Db) -> Result<()> {
    print!("{}", db.sdl());
    Ok(())
}
