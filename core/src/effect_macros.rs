//! Declarative macros for ergonomic effect construction
//!
//! These macros reduce boilerplate when creating `Effect` variants from
//! async blocks, streams and delays.

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use composable_todo_core::async_effect;
///
/// async_effect! {
///     let todos = repository.fetch_all().await.ok()?;
///     Some(TodoListAction::TodosLoaded(todos))
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create an `Effect::Stream` from any `Stream` of actions
///
/// # Example
///
/// ```rust,ignore
/// use composable_todo_core::stream_effect;
///
/// stream_effect!(futures::stream::iter(vec![
///     TodoFormAction::Delegate(TodoFormDelegate::Cancelled),
///     TodoFormAction::DismissRequested,
/// ]))
/// ```
#[macro_export]
macro_rules! stream_effect {
    ($stream:expr) => {
        $crate::effect::Effect::Stream(::std::boxed::Box::pin($stream))
    };
}

/// Create an `Effect::Delay` for scheduling delayed actions
///
/// # Example
///
/// ```rust,ignore
/// use composable_todo_core::delay;
/// use std::time::Duration;
///
/// delay! {
///     duration: Duration::from_secs(3),
///     action: TodoListAction::OnAppear
/// }
/// ```
#[macro_export]
macro_rules! delay {
    (
        duration: $duration:expr,
        action: $action:expr
    ) => {
        $crate::effect::Effect::Delay {
            duration: $duration,
            action: ::std::boxed::Box::new($action),
        }
    };
}
