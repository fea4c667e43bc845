pub mod discovery;
pub mod github;
pub mod markdown_file;
#[cfg(test)]
pub mod test_server;
