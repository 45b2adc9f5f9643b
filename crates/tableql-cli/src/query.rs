use anyhow::{bail, Context, Result};
use async_graphql::{Request, Variables};
use clap::Parser;
use std::{fs, path::PathBuf};
use tableql::Db;

#[derive(Parser, Debug)]
pub struct QueryCommand {
    /// The GraphQL document to run
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    pub(crate) document: Option<String>,

    /// Read the document from a file
    #[arg(short, long)]
    pub(crate) file: Option<PathBuf>,

    /// Variables as a JSON object
    #[arg(long)]
    pub(crate) variables: Option<String>,

    /// Operation to run when the document holds several
    #[arg(long)]
    pub(crate) operation_name: Option<String>,
}

impl QueryCommand {
    pub(crate) async fn run(self, db: &Db) -> Result<()> {
        let request = self.request()?;
        let response = db.execute(request).await;

        println!("{}", serde_json::to_string_pretty(&response)?);

        if response.is_err() {
            bail!("query returned {} error(s)", response.errors.len());
        }

        Ok(())
    }

    fn request(&self) -> Result<Request> {
        let document = match (&self.document, &self.file) {
            (Some(document), _) => document.clone(),
            (None, Some(path)) => fs::read_to_string(path)
                .with_context(|| format!("failed to read `{}`", path.display()))?,
            (None, None) => bail!("no query document given"),
        };

        let mut request = Request::new(document);

        if let Some(variables) = &self.variables {
            let json: serde_json::Value =
                serde_json::from_str(variables).context("`--variables` is not valid JSON")?;
            request = request.variables(Variables::from_json(json));
        }

        if let Some(name) = &self.operation_name {
            request = request.operation_name(name);
        }

        Ok(request)
    }
}
