pub use budgets::{Budget, BudgetOverview, BudgetScope};
pub use categories::CategoryNode;
pub use commands::{BudgetCmd, PostTransactionCmd};
pub use error::EngineError;
pub use ops::{Engine, EngineBuilder, HISTORY_LIMIT};
pub use transactions::{HistoryEntry, Transaction};

pub mod accounts;
pub mod budgets;
pub mod categories;
mod commands;
mod error;
mod ops;
pub mod transaction_categories;
pub mod transactions;
pub mod users;

type ResultEngine<T> = Result<T, EngineError>;
