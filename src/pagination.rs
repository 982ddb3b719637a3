//! Generic cursor-pagination driver for list commands.
//!
//! A list command supplies a fetch callback that retrieves one page and
//! prints its items; [`paginate`] owns the traversal policy: stop after one
//! page by default, walk every page under `--all`, or pause for a single
//! keypress between pages under `--interactive`.

use std::future::Future;

use console::{Key, Term};
use serde::{Deserialize, Serialize};

/// Parameters sent with every page request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PaginationParams {
    pub cursor: String,
    pub limit: i32,
    pub sort_direction: String,
}

impl PaginationParams {
    /// Builds the params from raw flag values. The cursor always starts
    /// empty; the limit must parse as a positive integer.
    pub fn from_flags(limit: &str, sort_direction: &str) -> Result<Self, PaginationError> {
        let limit: i32 = limit
            .parse()
            .map_err(|_| PaginationError::InvalidLimit(limit.to_owned()))?;
        if limit <= 0 {
            return Err(PaginationError::InvalidLimit(limit.to_string()));
        }

        Ok(Self {
            cursor: String::new(),
            limit,
            sort_direction: sort_direction.to_owned(),
        })
    }

    /// Query-string pairs for this page request. The cursor is omitted while
    /// empty so the first request starts from the beginning.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![("limit".to_owned(), self.limit.to_string())];
        if !self.cursor.is_empty() {
            query.push(("cursor".to_owned(), self.cursor.clone()));
        }
        if !self.sort_direction.is_empty() {
            query.push(("sort_direction".to_owned(), self.sort_direction.clone()));
        }
        query
    }
}

/// Pagination envelope returned alongside each page of results.
///
/// An empty `next_cursor` means the sequence is exhausted.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Pagination {
    #[serde(default)]
    pub next_cursor: String,
    #[serde(default)]
    pub sort_direction: String,
    #[serde(default)]
    pub has_next: bool,
}

/// Traversal mode flags. Interactive takes precedence when both are set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListOptions {
    pub all: bool,
    pub interactive: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum PaginationError {
    #[error("invalid limit value: {0}")]
    InvalidLimit(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("unable to read from terminal: {0}")]
    Read(#[source] std::io::Error),
}

/// Operator decision after a page has been printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    Continue,
    Quit,
}

/// Confirmation step between pages in interactive mode. The production
/// implementation reads one raw key from the terminal; tests script it.
pub trait PagePrompt {
    fn confirm_next_page(&mut self) -> Result<PageAction, PromptError>;
}

/// Prompts on the real terminal. `Term::read_key` switches the terminal to
/// raw mode for the single read and restores the previous state on every
/// exit path, including read errors.
pub struct TerminalPrompt {
    term: Term,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl PagePrompt for TerminalPrompt {
    fn confirm_next_page(&mut self) -> Result<PageAction, PromptError> {
        self.term
            .write_str("Press space to continue, q to quit: ")
            .map_err(PromptError::Read)?;

        let key = self.term.read_key().map_err(PromptError::Read)?;

        self.term.write_line("").map_err(PromptError::Read)?;

        match key {
            Key::Char('q') => Ok(PageAction::Quit),
            _ => Ok(PageAction::Continue),
        }
    }
}

/// Drives a list operation across one or more pages.
///
/// The callback performs one page fetch and prints the items itself; only
/// the pagination envelope comes back to the driver. Any fetch or prompt
/// error aborts the traversal immediately.
pub async fn paginate<F, Fut>(
    options: ListOptions,
    mut params: PaginationParams,
    prompt: &mut dyn PagePrompt,
    mut fetch: F,
) -> anyhow::Result<()>
where
    F: FnMut(PaginationParams) -> Fut,
    Fut: Future<Output = anyhow::Result<Pagination>>,
{
    let mut cursor = String::new();

    loop {
        params.cursor.clone_from(&cursor);

        let pagination = fetch(params.clone()).await?;

        if !options.all && !options.interactive {
            return Ok(());
        }

        if pagination.next_cursor.is_empty() {
            return Ok(());
        }

        if options.interactive {
            match prompt.confirm_next_page()? {
                PageAction::Quit => return Ok(()),
                PageAction::Continue => {}
            }
        }

        cursor = pagination.next_cursor;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::VecDeque;

    use super::*;

    struct ScriptedPrompt {
        actions: VecDeque<PageAction>,
        asked: usize,
    }

    impl ScriptedPrompt {
        fn new(actions: impl IntoIterator<Item = PageAction>) -> Self {
            Self {
                actions: actions.into_iter().collect(),
                asked: 0,
            }
        }
    }

    impl PagePrompt for ScriptedPrompt {
        fn confirm_next_page(&mut self) -> Result<PageAction, PromptError> {
            self.asked += 1;
            Ok(self.actions.pop_front().unwrap_or(PageAction::Quit))
        }
    }

    struct FailingPrompt;

    impl PagePrompt for FailingPrompt {
        fn confirm_next_page(&mut self) -> Result<PageAction, PromptError> {
            Err(PromptError::Read(std::io::Error::other("tty gone")))
        }
    }

    fn page(next_cursor: &str) -> Pagination {
        Pagination {
            next_cursor: next_cursor.to_owned(),
            ..Pagination::default()
        }
    }

    fn params() -> PaginationParams {
        PaginationParams::from_flags("25", "DESC").unwrap()
    }

    #[test]
    fn from_flags_parses_limit_and_direction() {
        let params = PaginationParams::from_flags("50", "ASC").unwrap();

        assert!(params.cursor.is_empty());
        assert_eq!(params.limit, 50);
        assert_eq!(params.sort_direction, "ASC");
    }

    #[test]
    fn from_flags_rejects_non_numeric_limit() {
        let err = PaginationParams::from_flags("lots", "").unwrap_err();

        assert!(err.to_string().contains("invalid limit value"));
    }

    #[test]
    fn from_flags_rejects_non_positive_limit() {
        PaginationParams::from_flags("0", "").unwrap_err();
        PaginationParams::from_flags("-3", "").unwrap_err();
    }

    #[test]
    fn to_query_omits_empty_cursor_and_direction() {
        let params = PaginationParams::from_flags("25", "").unwrap();

        let query = params.to_query();

        assert_eq!(query, vec![("limit".to_owned(), "25".to_owned())]);
    }

    #[test]
    fn to_query_includes_cursor_once_set() {
        let mut params = params();
        params.cursor = "abc".to_owned();

        let query = params.to_query();

        assert!(query.contains(&("cursor".to_owned(), "abc".to_owned())));
        assert!(query.contains(&("sort_direction".to_owned(), "DESC".to_owned())));
    }

    #[tokio::test]
    async fn single_page_mode_fetches_exactly_once() {
        let calls = Cell::new(0);
        let mut prompt = ScriptedPrompt::new([]);

        paginate(ListOptions::default(), params(), &mut prompt, |_| {
            calls.set(calls.get() + 1);
            async { Ok(page("more-available")) }
        })
        .await
        .unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(prompt.asked, 0);
    }

    #[tokio::test]
    async fn all_mode_walks_until_cursor_runs_out() {
        let calls = Cell::new(0);
        let cursors = ["c1", "c2", ""];
        let seen = std::cell::RefCell::new(Vec::new());
        let mut prompt = ScriptedPrompt::new([]);

        let options = ListOptions {
            all: true,
            interactive: false,
        };

        paginate(options, params(), &mut prompt, |p| {
            let index = calls.get();
            calls.set(index + 1);
            seen.borrow_mut().push(p.cursor.clone());
            async move { Ok(page(cursors[index])) }
        })
        .await
        .unwrap();

        assert_eq!(calls.get(), 3);
        assert_eq!(*seen.borrow(), vec!["", "c1", "c2"]);
        assert_eq!(prompt.asked, 0);
    }

    #[tokio::test]
    async fn all_mode_stops_when_first_page_is_the_last() {
        let calls = Cell::new(0);
        let mut prompt = ScriptedPrompt::new([]);

        let options = ListOptions {
            all: true,
            interactive: false,
        };

        paginate(options, params(), &mut prompt, |_| {
            calls.set(calls.get() + 1);
            async { Ok(page("")) }
        })
        .await
        .unwrap();

        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn interactive_mode_prompts_between_pages() {
        let calls = Cell::new(0);
        let mut prompt = ScriptedPrompt::new([PageAction::Continue, PageAction::Continue]);
        let cursors = ["c1", "c2", ""];

        let options = ListOptions {
            all: false,
            interactive: true,
        };

        paginate(options, params(), &mut prompt, |_| {
            let index = calls.get();
            calls.set(index + 1);
            async move { Ok(page(cursors[index])) }
        })
        .await
        .unwrap();

        assert_eq!(calls.get(), 3);
        assert_eq!(prompt.asked, 2);
    }

    #[tokio::test]
    async fn interactive_quit_stops_before_next_fetch() {
        let calls = Cell::new(0);
        let mut prompt = ScriptedPrompt::new([PageAction::Quit]);

        let options = ListOptions {
            all: false,
            interactive: true,
        };

        paginate(options, params(), &mut prompt, |_| {
            calls.set(calls.get() + 1);
            async { Ok(page("more")) }
        })
        .await
        .unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(prompt.asked, 1);
    }

    #[tokio::test]
    async fn interactive_takes_precedence_when_both_flags_set() {
        let calls = Cell::new(0);
        let mut prompt = ScriptedPrompt::new([PageAction::Quit]);

        let options = ListOptions {
            all: true,
            interactive: true,
        };

        paginate(options, params(), &mut prompt, |_| {
            calls.set(calls.get() + 1);
            async { Ok(page("more")) }
        })
        .await
        .unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(prompt.asked, 1);
    }

    #[tokio::test]
    async fn fetch_error_aborts_traversal() {
        let calls = Cell::new(0);
        let mut prompt = ScriptedPrompt::new([]);

        let options = ListOptions {
            all: true,
            interactive: false,
        };

        let result = paginate(options, params(), &mut prompt, |_| {
            let index = calls.get();
            calls.set(index + 1);
            async move {
                if index == 1 {
                    anyhow::bail!("cannot list orders: boom");
                }
                Ok(page("next"))
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.get(), 2);
        assert_eq!(prompt.asked, 0);
    }

    #[tokio::test]
    async fn prompt_error_aborts_traversal() {
        let calls = Cell::new(0);
        let mut prompt = FailingPrompt;

        let options = ListOptions {
            all: false,
            interactive: true,
        };

        let result = paginate(options, params(), &mut prompt, |_| {
            calls.set(calls.get() + 1);
            async { Ok(page("more")) }
        })
        .await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("unable to read from terminal"));
        assert_eq!(calls.get(), 1);
    }
}
