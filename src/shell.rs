use std::{borrow::Cow, io::IsTerminal};

use clap::{Args, ValueEnum};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::{
    contact::Contact,
    error::ShellError,
    trie::{ContactTrie, DeleteOutcome},
};

#[derive(Args, Debug)]
pub struct ShellArgs {
    /// How search and listing results are printed.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One `Name: .., Phone: .., Email: ..` line per contact
    #[default]
    Text,
    /// A pretty-printed JSON array
    Json,
}

const MENU: &str = "\n--- Contact Management System ---\n\
1. Add Contact\n\
2. Search Contact\n\
3. Display All Contacts\n\
4. Delete Contact\n\
5. Exit\n\
Enter your choice: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Add,
    Search,
    DisplayAll,
    Delete,
    Exit,
}

impl MenuChoice {
    fn parse(line: &str) -> Option<Self> {
        match line.trim().parse::<u32>().ok()? {
            1 => Some(MenuChoice::Add),
            2 => Some(MenuChoice::Search),
            3 => Some(MenuChoice::DisplayAll),
            4 => Some(MenuChoice::Delete),
            5 => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

pub async fn execute_shell(args: ShellArgs) -> anyhow::Result<()> {
    info!(
        format = ?args.format,
        interactive = std::io::stdin().is_terminal(),
        "Starting contact shell"
    );

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    Shell::new(stdin, stdout, args.format).run().await?;

    Ok(())
}

/// Menu-driven front end over a single [`ContactTrie`].
pub struct Shell<R, W> {
    index: ContactTrie,
    input: R,
    out: W,
    format: OutputFormat,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, out: W, format: OutputFormat) -> Self {
        Self {
            index: ContactTrie::new(),
            input,
            out,
            format,
        }
    }

    /// Runs the menu loop until the user exits or input ends at the menu prompt.
    pub async fn run(&mut self) -> Result<(), ShellError> {
        loop {
            self.write(MENU).await?;
            let Some(line) = self.read_line().await? else {
                debug!("Input closed at menu");
                break;
            };

            match MenuChoice::parse(&line) {
                Some(MenuChoice::Add) => self.add().await?,
                Some(MenuChoice::Search) => self.search().await?,
                Some(MenuChoice::DisplayAll) => self.display_all().await?,
                Some(MenuChoice::Delete) => self.delete().await?,
                Some(MenuChoice::Exit) => {
                    self.write("Exiting Contact Management System.\n").await?;
                    break;
                }
                None => {
                    warn!("Invalid menu choice: {:?}", line);
                    self.write("Invalid choice. Please try again.\n").await?;
                }
            }
        }

        self.out.flush().await?;
        info!(contacts = self.index.len(), "Contact shell finished");
        Ok(())
    }

    async fn add(&mut self) -> Result<(), ShellError> {
        let name = self.prompt("Enter Name: ").await?;
        let phone = self.prompt("Enter Phone Number: ").await?;
        let email = self.prompt("Enter Email: ").await?;

        self.index.insert(&name, &phone, &email);
        self.write("Contact added successfully.\n").await
    }

    async fn search(&mut self) -> Result<(), ShellError> {
        let prefix = self.prompt("Enter name or prefix to search: ").await?;
        let rendered = render(
            &self.index.search(&prefix),
            self.format,
            "Search Results:",
            "No contacts found.",
        )?;
        self.write(&rendered).await
    }

    async fn display_all(&mut self) -> Result<(), ShellError> {
        if self.index.is_empty() {
            debug!("Directory is empty");
        }
        let rendered = render(
            &self.index.list_all(),
            self.format,
            "All Contacts:",
            "No contacts available.",
        )?;
        self.write(&rendered).await
    }

    async fn delete(&mut self) -> Result<(), ShellError> {
        let name = self.prompt("Enter the contact name to delete: ").await?;
        let message = match self.index.delete(&name) {
            DeleteOutcome::Deleted => "Contact deleted.\n",
            DeleteOutcome::NotFound => "Contact not found.\n",
        };
        debug!(
            contacts = self.index.len(),
            nodes = self.index.node_count(),
            "Index after delete"
        );
        self.write(message).await
    }

    async fn prompt(&mut self, prompt: &str) -> Result<String, ShellError> {
        self.write(prompt).await?;
        self.read_line()
            .await?
            .ok_or_else(|| ShellError::InputClosed {
                prompt: prompt.trim_end().to_string(),
            })
    }

    /// Reads one line without its `\n` or `\r\n`. Bytes that are not valid UTF-8
    /// become U+FFFD instead of ending the session. `None` at end of input.
    async fn read_line(&mut self) -> Result<Option<String>, ShellError> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(None);
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }

        let line = String::from_utf8_lossy(&buf);
        if let Cow::Owned(_) = line {
            warn!("Replaced invalid UTF-8 in input line: {:?}", line);
        }
        Ok(Some(line.into_owned()))
    }

    async fn write(&mut self, text: &str) -> Result<(), ShellError> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.flush().await?;
        Ok(())
    }

    #[cfg(test)]
    fn index(&self) -> &ContactTrie {
        &self.index
    }
}

fn render(
    contacts: &[&Contact],
    format: OutputFormat,
    header: &str,
    empty: &str,
) -> Result<String, ShellError> {
    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(contacts)?)),
        OutputFormat::Text if contacts.is_empty() => Ok(format!("{}\n", empty)),
        OutputFormat::Text => {
            let mut out = format!("\n{}\n", header);
            for contact in contacts {
                out.push_str(&contact.to_string());
                out.push('\n');
            }
            Ok(out)
        }
    }
}
