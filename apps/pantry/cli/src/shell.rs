//! Interactive session over stdin

use clap::Parser;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::client::{ItemDraft, ItemsApi};
use crate::commands::{ShellCommand, ShellLine};
use crate::view::ItemsView;

const HELP: &str = "commands: list | add <name> [-q N] [-c CATEGORY] [-u UNIT] | \
edit <n> [-n NAME] [-q N] [-c CATEGORY] [-u UNIT] | toggle <n> | delete <n> | quit";

/// Outcome of one shell line
#[derive(Debug, PartialEq, Eq)]
enum Step {
    Continue,
    Quit,
}

/// Id of the item at `position`, or a message for the user.
fn id_at(view: &ItemsView, position: usize) -> Result<String, String> {
    view.item_at(position)
        .map(|item| item.id.to_string())
        .ok_or_else(|| format!("no item at position {}", position))
}

async fn apply<A: ItemsApi + ?Sized>(
    view: &mut ItemsView,
    api: &A,
    command: ShellCommand,
) -> Result<Step, String> {
    match command {
        ShellCommand::List => view.refresh(api).await,
        ShellCommand::Add(args) => view.add(api, ItemDraft::from(args)).await,
        ShellCommand::Edit { position, fields } => {
            let id = id_at(view, position)?;
            view.edit(api, &id, ItemDraft::from(fields)).await;
        }
        ShellCommand::Toggle { position } => {
            let id = id_at(view, position)?;
            view.toggle(api, &id).await;
        }
        ShellCommand::Delete { position } => {
            let id = id_at(view, position)?;
            view.delete(api, &id).await;
        }
        ShellCommand::Quit => return Ok(Step::Quit),
    }
    Ok(Step::Continue)
}

/// Run the shell until `quit` or end of input.
///
/// The list is loaded once up front and re-rendered after every command.
pub async fn run<A, R, W>(api: &A, input: R, mut output: W) -> std::io::Result<()>
where
    A: ItemsApi + ?Sized,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut view = ItemsView::new();
    view.refresh(api).await;
    output.write_all(view.render().as_bytes()).await?;
    output.write_all(format!("{}\n> ", HELP).as_bytes()).await?;
    output.flush().await?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            output.write_all(b"> ").await?;
            output.flush().await?;
            continue;
        }

        let step = match ShellLine::try_parse_from(words) {
            Ok(parsed) => match apply(&mut view, api, parsed.command).await {
                Ok(step) => {
                    output.write_all(view.render().as_bytes()).await?;
                    step
                }
                Err(message) => {
                    output.write_all(format!("{}\n", message).as_bytes()).await?;
                    Step::Continue
                }
            },
            Err(e) => {
                tracing::debug!(error = %e, "Unparsed shell line");
                output.write_all(format!("{}\n", HELP).as_bytes()).await?;
                Step::Continue
            }
        };

        if step == Step::Quit {
            break;
        }
        output.write_all(b"> ").await?;
        output.flush().await?;
    }

    output.flush().await
}
