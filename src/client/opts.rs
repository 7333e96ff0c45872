use crate::record::DEFAULT_TABLE;

#[derive(Debug, Clone)]
pub(crate) struct ClientOptions {
    pub(crate) schema: String,
    pub(crate) table: String,
    pub(crate) create_table: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        ClientOptions {
            schema: "public".to_string(),
            table: DEFAULT_TABLE.to_string(),
            create_table: true,
        }
    }
}
