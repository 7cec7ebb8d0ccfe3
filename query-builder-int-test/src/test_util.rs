use parking_lot::RwLock;
use query_builder::collection::{FilteredCollection, FindOptions, FindProvider};
use query_builder::common::{Value, AND_OPERATOR};
use query_builder::errors::{ErrorKind, QueryError, QueryResult};
use query_builder::selector::Selector;
use std::sync::Arc;

/// Runs `test` between `before` and `after`. `after` runs even if the test
/// returns an error; the first error fails the test.
pub fn run_test<T, B, A>(before: B, test: T, after: A)
where
    B: Fn() -> QueryResult<TestContext>,
    T: Fn(TestContext) -> QueryResult<()>,
    A: Fn(TestContext) -> QueryResult<()>,
{
    let ctx = match before() {
        Ok(ctx) => ctx,
        Err(e) => panic!("Before run failed: {:?}", e),
    };

    let test_result = test(ctx.clone());
    let after_result = after(ctx);

    if let Err(e) = test_result {
        panic!("Test failed: {:?}", e);
    }
    if let Err(e) = after_result {
        panic!("After run failed: {:?}", e);
    }
}

#[derive(Clone)]
pub struct TestContext {
    collection: Arc<FilteredCollection<MemoryCollection>>,
}

impl TestContext {
    pub fn collection(&self) -> &FilteredCollection<MemoryCollection> {
        &self.collection
    }
}

/// A fresh context over an empty in-memory collection without filters.
pub fn create_test_context() -> QueryResult<TestContext> {
    Ok(TestContext {
        collection: Arc::new(FilteredCollection::new(MemoryCollection::new())),
    })
}

/// A context whose collection holds a few users, one of them soft deleted.
pub fn create_users_context() -> QueryResult<TestContext> {
    let ctx = create_test_context()?;
    let users = ctx.collection();
    users.insert(user("u1", "Max", "alice", None))?;
    users.insert(user("u2", "Anna", "bob", None))?;
    users.insert(user("u3", "Max", "bob", Some("2024-01-01")))?;
    users.insert(user("u4", "Lena", "alice", Some("2024-02-01")))?;
    Ok(ctx)
}

pub fn cleanup(ctx: TestContext) -> QueryResult<()> {
    ctx.collection().clear();
    Ok(())
}

fn user(id: &str, name: &str, owner: &str, deleted_at: Option<&str>) -> Selector {
    let mut doc = Selector::new();
    // keys are literals, never empty
    let _ = doc.put("_id", id);
    let _ = doc.put("name", name);
    let _ = doc.put("owner", owner);
    let _ = doc.put("deletedAt", deleted_at);
    doc
}

/// An in-memory stand-in for a document collection.
///
/// Understands equality on top-level fields and `$and`; a missing field
/// matches `null`. Remembers the last selector it was asked to find.
#[derive(Default)]
pub struct MemoryCollection {
    documents: RwLock<Vec<Selector>>,
    last_query: RwLock<Option<Selector>>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        MemoryCollection::default()
    }

    pub fn insert(&self, document: Selector) -> QueryResult<()> {
        self.documents.write().push(document);
        Ok(())
    }

    pub fn clear(&self) {
        self.documents.write().clear();
        *self.last_query.write() = None;
    }

    pub fn last_query(&self) -> Option<Selector> {
        self.last_query.read().clone()
    }

    fn matches(document: &Selector, selector: &Selector) -> QueryResult<bool> {
        for (key, expected) in selector.iter() {
            if key == AND_OPERATOR {
                let operands = expected.as_array().ok_or_else(|| {
                    QueryError::new("$and expects an array", ErrorKind::FindError)
                })?;
                for operand in operands {
                    let operand = operand.as_selector().ok_or_else(|| {
                        QueryError::new("$and operands must be selectors", ErrorKind::FindError)
                    })?;
                    if !Self::matches(document, operand)? {
                        return Ok(false);
                    }
                }
            } else {
                let actual = document.get(key).cloned().unwrap_or(Value::Null);
                if &actual != expected {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }
}

impl FindProvider for MemoryCollection {
    type Cursor = Vec<Selector>;

    fn find_with_options(
        &self,
        selector: Selector,
        find_options: &FindOptions,
    ) -> QueryResult<Vec<Selector>> {
        *self.last_query.write() = Some(selector.clone());

        let documents = self.documents.read();
        let mut found = Vec::new();
        for document in documents.iter() {
            if Self::matches(document, &selector)? {
                found.push(document.clone());
            }
        }

        let skip = find_options.skip_count().unwrap_or(0) as usize;
        let limit = find_options.limit_count().map(|l| l as usize).unwrap_or(usize::MAX);
        Ok(found.into_iter().skip(skip).take(limit).collect())
    }
}

/// The `_id`s of the found documents, in order.
pub fn ids(documents: &[Selector]) -> Vec<String> {
    documents
        .iter()
        .filter_map(|doc| doc.get("_id").and_then(|v| v.as_string()).cloned())
        .collect()
}
