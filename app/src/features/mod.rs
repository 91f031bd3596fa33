//! Feature reducers
//!
//! Each feature owns a state, an action enum and a reducer. Child features
//! talk to their parent through `Delegate` actions.

pub mod todo_detail;
pub mod todo_form;
pub mod todo_list;
