// selector constants
pub const DOC_ID: &str = "_id";
pub const AND_OPERATOR: &str = "$and";
