//! Interactive menu shell
//!
//! Thin console wrapper over the three managers. Prompts are line-oriented,
//! every menu action forwards one request to exactly one manager, and the
//! loop keeps going until exit or end of input. The shell is generic over
//! its input and output so tests can drive it with in-memory buffers.

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::Result;
use colored::Colorize;

use studyhall_core::account::{AccountManager, RoleUpdate, User};
use studyhall_core::config::Config;
use studyhall_core::question::{QuestionManager, Submission};
use studyhall_core::review::ReviewManager;
use studyhall_core::types::{AnswerId, QuestionId, ReviewId};
use studyhall_core::StudyhallError;

/// Interactive session state
pub struct Shell<R, W> {
    accounts: AccountManager,
    questions: QuestionManager,
    reviews: ReviewManager,
    /// Username of the logged-in account, if any
    current_user: Option<String>,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Build a shell with managers configured from `config`
    pub fn new(config: Config, input: R, output: W) -> Self {
        Self {
            accounts: AccountManager::with_policy(config.registration_policy()),
            questions: QuestionManager::with_policy(config.content_policy()),
            reviews: ReviewManager::with_policy(config.content_policy()),
            current_user: None,
            input,
            output,
        }
    }

    /// Run the menu loop until exit or end of input
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "{}", "Welcome to studyhall!".bold())?;

        if self.accounts.is_empty() && !self.bootstrap()? {
            writeln!(self.output, "No users registered. Exiting.")?;
            return Ok(());
        }

        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Enter option: ")? else {
                break;
            };
            match choice.trim() {
                "1" => self.register_user(false)?,
                "2" => self.login()?,
                "3" => self.list_users()?,
                "4" => self.submit_question()?,
                "5" => self.list_unresolved()?,
                "6" => self.update_question()?,
                "7" => self.answer_question()?,
                "8" => self.accept_answer()?,
                "9" => self.submit_review()?,
                "10" => self.update_review()?,
                "11" => self.list_reviews()?,
                "12" => self.change_password()?,
                "13" => self.update_roles()?,
                "14" => self.delete_user()?,
                "0" => {
                    writeln!(self.output, "Exiting application.")?;
                    break;
                }
                _ => self.report_fail("Invalid option. Please try again.")?,
            }
        }

        self.output.flush()?;
        Ok(())
    }

    /// One-shot first-admin registration; false means the store is still empty
    fn bootstrap(&mut self) -> Result<bool> {
        writeln!(
            self.output,
            "No users found. Please register the first user (admin)."
        )?;
        self.register_user(true)?;
        Ok(!self.accounts.is_empty())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", "Main Menu:".bold())?;
        writeln!(self.output, "1. Register new user")?;
        writeln!(self.output, "2. Login")?;
        writeln!(self.output, "3. List users (admin only)")?;
        writeln!(self.output, "4. Submit a question")?;
        writeln!(self.output, "5. List unresolved questions")?;
        writeln!(self.output, "6. Update a question")?;
        writeln!(self.output, "7. Answer a question")?;
        writeln!(self.output, "8. Mark an answer as accepted")?;
        writeln!(self.output, "9. Submit a review")?;
        writeln!(self.output, "10. Update a review")?;
        writeln!(self.output, "11. List reviews")?;
        writeln!(self.output, "12. Change password")?;
        writeln!(self.output, "13. Update user roles (admin only)")?;
        writeln!(self.output, "14. Delete a user (admin only)")?;
        writeln!(self.output, "0. Exit")?;
        Ok(())
    }

    fn register_user(&mut self, first_user: bool) -> Result<()> {
        let Some(username) = self.prompt("Enter username: ")? else {
            return Ok(());
        };
        let Some(password) = self.prompt("Enter password: ")? else {
            return Ok(());
        };
        let Some(email) = self.prompt("Enter email: ")? else {
            return Ok(());
        };

        match self.accounts.register(&username, &password, &email, first_user) {
            Ok(()) => self.report_ok("User registered successfully.")?,
            Err(err) => self.report_err(&err)?,
        }
        Ok(())
    }

    fn login(&mut self) -> Result<()> {
        let Some(username) = self.prompt("Enter username: ")? else {
            return Ok(());
        };
        let Some(password) = self.prompt("Enter password: ")? else {
            return Ok(());
        };

        let outcome = self
            .accounts
            .login(&username, &password)
            .map(|user| (user.username().to_string(), format_roles(user)));
        match outcome {
            Ok((name, roles)) => {
                self.current_user = Some(name.clone());
                self.report_ok(&format!("Login successful. Welcome, {}!", name))?;
                writeln!(self.output, "Your roles: {}", roles)?;
            }
            Err(err) => self.report_err(&err)?,
        }
        Ok(())
    }

    fn list_users(&mut self) -> Result<()> {
        if !self.require_admin("list users")? {
            return Ok(());
        }

        writeln!(self.output, "User List:")?;
        for user in self.accounts.all_sorted() {
            writeln!(self.output, "  {}", user)?;
        }
        Ok(())
    }

    fn change_password(&mut self) -> Result<()> {
        let Some(username) = self.current_user.clone() else {
            self.report_fail("Please login first.")?;
            return Ok(());
        };
        let Some(current) = self.prompt("Enter current password: ")? else {
            return Ok(());
        };

        if let Err(err) = self.accounts.login(&username, &current) {
            self.report_err(&err)?;
            return Ok(());
        }

        let Some(new_password) = self.prompt("Enter new password: ")? else {
            return Ok(());
        };
        match self.accounts.change_password(&username, &new_password) {
            Ok(()) => self.report_ok("Password changed successfully.")?,
            Err(err) => self.report_err(&err)?,
        }
        Ok(())
    }

    fn update_roles(&mut self) -> Result<()> {
        if !self.require_admin("update roles")? {
            return Ok(());
        }

        let Some(username) = self.prompt("Enter username: ")? else {
            return Ok(());
        };
        let Some(role) = self.prompt("Enter role name: ")? else {
            return Ok(());
        };
        let Some(mode) = self.prompt("Add or remove? (add/remove): ")? else {
            return Ok(());
        };

        let update = match mode.trim().to_lowercase().as_str() {
            "add" => RoleUpdate::Grant,
            "remove" => RoleUpdate::Revoke,
            _ => {
                self.report_fail("Please answer 'add' or 'remove'.")?;
                return Ok(());
            }
        };

        match self.accounts.update_role(&username, &role, update) {
            Ok(()) => match update {
                RoleUpdate::Grant => self.report_ok("Role added.")?,
                RoleUpdate::Revoke => self.report_ok("Role removed.")?,
            },
            Err(err) => self.report_err(&err)?,
        }
        Ok(())
    }

    fn delete_user(&mut self) -> Result<()> {
        if !self.require_admin("delete users")? {
            return Ok(());
        }

        let Some(username) = self.prompt("Enter username to delete: ")? else {
            return Ok(());
        };
        let Some(confirmation) = self.prompt("Type 'Yes' to confirm deletion: ")? else {
            return Ok(());
        };

        match self.accounts.delete(&username, &confirmation) {
            Ok(removed) => {
                if self.current_user.as_deref() == Some(removed.username()) {
                    self.current_user = None;
                }
                self.report_ok("User deleted successfully.")?;
            }
            Err(err) => self.report_err(&err)?,
        }
        Ok(())
    }

    fn submit_question(&mut self) -> Result<()> {
        let Some(text) = self.prompt("Enter your question: ")? else {
            return Ok(());
        };

        match self.questions.submit(&text) {
            Ok(Submission::Submitted(id)) => {
                self.report_ok(&format!("Question {} submitted.", id))?
            }
            Ok(Submission::Duplicate(existing)) => self.report_warn(&format!(
                "A similar question already exists (question {}). Not submitted.",
                existing
            ))?,
            Err(err) => self.report_err(&err)?,
        }
        Ok(())
    }

    fn list_unresolved(&mut self) -> Result<()> {
        let unresolved = self.questions.unresolved();
        if unresolved.is_empty() {
            writeln!(self.output, "No unresolved questions.")?;
            return Ok(());
        }

        writeln!(self.output, "Unresolved Questions:")?;
        for question in unresolved {
            writeln!(self.output, "  {}", question)?;
            for answer in question.answers() {
                writeln!(self.output, "    {}", answer)?;
            }
        }
        Ok(())
    }

    fn update_question(&mut self) -> Result<()> {
        let Some(raw) = self.prompt("Enter question ID to update: ")? else {
            return Ok(());
        };
        let Some(id) = self.parse_id::<QuestionId>(&raw)? else {
            return Ok(());
        };
        let Some(text) = self.prompt("Enter the new question text: ")? else {
            return Ok(());
        };

        match self.questions.update(id, &text) {
            Ok(()) => self.report_ok("Question updated.")?,
            Err(err) => self.report_err(&err)?,
        }
        Ok(())
    }

    fn answer_question(&mut self) -> Result<()> {
        let Some(raw) = self.prompt("Enter question ID to answer: ")? else {
            return Ok(());
        };
        let Some(id) = self.parse_id::<QuestionId>(&raw)? else {
            return Ok(());
        };
        let Some(text) = self.prompt("Enter your answer: ")? else {
            return Ok(());
        };

        match self.questions.submit_answer(id, &text) {
            Ok(answer_id) => {
                self.report_ok(&format!("Answer {} added to question {}.", answer_id, id))?
            }
            Err(err) => self.report_err(&err)?,
        }
        Ok(())
    }

    fn accept_answer(&mut self) -> Result<()> {
        let Some(raw) = self.prompt("Enter question ID: ")? else {
            return Ok(());
        };
        let Some(question_id) = self.parse_id::<QuestionId>(&raw)? else {
            return Ok(());
        };
        let Some(raw) = self.prompt("Enter answer ID to accept: ")? else {
            return Ok(());
        };
        let Some(answer_id) = self.parse_id::<AnswerId>(&raw)? else {
            return Ok(());
        };

        match self.questions.accept_answer(question_id, answer_id) {
            Ok(()) => self.report_ok("Answer marked as accepted.")?,
            Err(err) => self.report_err(&err)?,
        }
        Ok(())
    }

    fn submit_review(&mut self) -> Result<()> {
        let Some(content) = self.prompt("Enter review content: ")? else {
            return Ok(());
        };

        match self.reviews.submit(&content) {
            Ok(id) => self.report_ok(&format!("Review {} submitted.", id))?,
            Err(err) => self.report_err(&err)?,
        }
        Ok(())
    }

    fn update_review(&mut self) -> Result<()> {
        let Some(raw) = self.prompt("Enter review ID to update: ")? else {
            return Ok(());
        };
        let Some(id) = self.parse_id::<ReviewId>(&raw)? else {
            return Ok(());
        };
        let Some(content) = self.prompt("Enter the new review content: ")? else {
            return Ok(());
        };

        match self.reviews.update(id, &content) {
            Ok(()) => self.report_ok("Review updated.")?,
            Err(err) => self.report_err(&err)?,
        }
        Ok(())
    }

    fn list_reviews(&mut self) -> Result<()> {
        if self.reviews.is_empty() {
            writeln!(self.output, "No reviews yet.")?;
            return Ok(());
        }

        writeln!(self.output, "Reviews:")?;
        for review in self.reviews.all() {
            writeln!(self.output, "  {}", review)?;
        }
        Ok(())
    }

    /// Print a prompt and read one line; None means end of input
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Parse a numeric id, reporting bad input as a failure
    fn parse_id<T: FromStr>(&mut self, raw: &str) -> Result<Option<T>> {
        match raw.trim().parse::<T>() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                self.report_fail(&format!("'{}' is not a valid id.", raw.trim()))?;
                Ok(None)
            }
        }
    }

    fn require_admin(&mut self, action: &str) -> Result<bool> {
        let allowed = self
            .current_user
            .as_deref()
            .and_then(|name| self.accounts.get(name))
            .map(|user| user.is_admin())
            .unwrap_or(false);
        if !allowed {
            self.report_fail(&format!("Only admin can {}.", action))?;
        }
        Ok(allowed)
    }

    fn report_ok(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{} {}", "✓".green(), message)?;
        Ok(())
    }

    fn report_warn(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{} {}", "⚠".yellow(), message)?;
        Ok(())
    }

    fn report_fail(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{} {}", "✗".red(), message)?;
        Ok(())
    }

    fn report_err(&mut self, err: &StudyhallError) -> Result<()> {
        self.report_fail(&err.to_string())
    }
}

fn format_roles(user: &User) -> String {
    let names: Vec<&str> = user.roles().map(|role| role.name()).collect();
    format!("[{}]", names.join(", "))
}
