// Interactive menu loop
//
// Thin layer over the store: prompts for input, calls one inventory
// operation, prints the outcome. Store errors become messages and the
// loop carries on.

use crate::cli::display;
use crate::cli::menu::MenuChoice;
use crate::cli::prompt::Prompter;
use crate::config::Settings;
use crate::error::Result;
use crate::store::{Inventory, LoadOutcome};
use std::io::{BufRead, Write};
use tracing::{info, warn};

pub struct Session<R, W> {
    inventory: Inventory,
    settings: Settings,
    prompter: Prompter<R, W>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(inventory: Inventory, settings: Settings, prompter: Prompter<R, W>) -> Self {
        Self {
            inventory,
            settings,
            prompter,
        }
    }

    /// Load the configured file and announce what was found
    ///
    /// An unreadable file is reported and the session starts empty.
    pub fn start(settings: Settings, prompter: Prompter<R, W>) -> Result<Self> {
        let mut session = Self::new(Inventory::new(), settings, prompter);
        session.handle_load()?;
        Ok(session)
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    /// Run until the user exits or input ends, then save
    ///
    /// The save happens even when the console fails part way through.
    ///
    /// # Returns
    /// * `Ok(())` - Session ended and the inventory was saved
    /// * `Err(InventoryError::Io)` - Console I/O failed, or the final save
    ///   failed; a console error is reported ahead of a save error
    pub fn run(&mut self) -> Result<()> {
        let outcome = self.menu_loop();
        if let Err(e) = &outcome {
            warn!(error = %e, "Console failed, saving before exit");
        }

        let saved = self.shutdown();
        outcome.and(saved)
    }

    fn menu_loop(&mut self) -> Result<()> {
        writeln!(self.prompter.output(), "Welcome to Stockroom!")?;

        loop {
            self.print_menu()?;
            let Some(choice) = self.prompter.choice()? else {
                return Ok(());
            };

            let keep_going = match choice {
                MenuChoice::AddProduct => self.handle_add()?,
                MenuChoice::ViewAll => self.handle_view()?,
                MenuChoice::Search => self.handle_search()?,
                MenuChoice::UpdateQuantity => self.handle_update()?,
                MenuChoice::Save => self.handle_save()?,
                MenuChoice::Load => self.handle_load()?,
                MenuChoice::LowStock => self.handle_low_stock()?,
                MenuChoice::Exit => {
                    let out = self.prompter.output();
                    writeln!(out, "\nThank you for using Stockroom!")?;
                    writeln!(out, "Data will be automatically saved.")?;
                    return Ok(());
                }
            };

            if !keep_going || !self.prompter.pause()? {
                return Ok(());
            }
        }
    }

    fn shutdown(&mut self) -> Result<()> {
        match self.inventory.save(&self.settings.file) {
            Ok(()) => {
                info!(path = %self.settings.file.display(), "Saved on exit");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Save on exit failed");
                Err(e)
            }
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        let out = self.prompter.output();
        let rule = "=".repeat(43);

        writeln!(out, "\n{}", rule)?;
        writeln!(out, "{:^43}", "STOCKROOM INVENTORY")?;
        writeln!(out, "{}", rule)?;
        for choice in MenuChoice::ALL {
            writeln!(out, "{}", choice)?;
        }
        writeln!(out, "{}", rule)?;
        Ok(())
    }

    // Each handler returns false when input ran out mid-prompt

    fn handle_add(&mut self) -> Result<bool> {
        writeln!(self.prompter.output(), "\n=== ADD NEW PRODUCT ===")?;

        let Some(id) = self.prompter.integer("Enter Product ID: ")? else {
            return Ok(false);
        };
        if self.inventory.find_by_id(id).is_some() {
            writeln!(self.prompter.output(), "Error: Product with ID {} already exists!", id)?;
            return Ok(true);
        }

        let Some(name) = self.prompter.text("Enter Product Name: ")? else {
            return Ok(false);
        };
        let Some(price) = self.prompter.number("Enter Product Price: ")? else {
            return Ok(false);
        };
        let Some(quantity) = self.prompter.integer("Enter Product Quantity: ")? else {
            return Ok(false);
        };

        match self.inventory.add(id, name.trim(), price, quantity) {
            Ok(()) => writeln!(self.prompter.output(), "Product added successfully!")?,
            Err(e) => writeln!(self.prompter.output(), "Error: {}", e.user_message())?,
        }
        Ok(true)
    }

    fn handle_view(&mut self) -> Result<bool> {
        let out = self.prompter.output();
        writeln!(out, "\n=== PRODUCT INVENTORY ===")?;
        display::write_inventory(out, self.inventory.list())?;
        Ok(true)
    }

    fn handle_search(&mut self) -> Result<bool> {
        writeln!(self.prompter.output(), "\n=== SEARCH PRODUCT ===")?;

        let Some(id) = self.prompter.integer("Enter Product ID to search: ")? else {
            return Ok(false);
        };

        let out = self.prompter.output();
        match self.inventory.find_by_id(id) {
            Some(product) => {
                writeln!(out, "\nProduct Found:")?;
                display::write_product(out, product)?;
            }
            None => writeln!(out, "Product with ID {} not found!", id)?,
        }
        Ok(true)
    }

    fn handle_update(&mut self) -> Result<bool> {
        writeln!(self.prompter.output(), "\n=== UPDATE PRODUCT QUANTITY ===")?;

        let Some(id) = self.prompter.integer("Enter Product ID: ")? else {
            return Ok(false);
        };
        let Some(current) = self.inventory.find_by_id(id).map(|p| p.quantity()) else {
            writeln!(self.prompter.output(), "Product with ID {} not found!", id)?;
            return Ok(true);
        };

        writeln!(self.prompter.output(), "Current quantity: {}", current)?;
        let Some(quantity) = self.prompter.integer("Enter new quantity: ")? else {
            return Ok(false);
        };

        match self.inventory.update_quantity(id, quantity) {
            Ok(()) => writeln!(self.prompter.output(), "Quantity updated successfully!")?,
            Err(e) => writeln!(self.prompter.output(), "Error: {}", e.user_message())?,
        }
        Ok(true)
    }

    fn handle_save(&mut self) -> Result<bool> {
        let message = match self.inventory.save(&self.settings.file) {
            Ok(()) => "Data saved to file successfully!".to_string(),
            Err(e) => {
                warn!(error = %e, "Save failed");
                format!("Error: Unable to save data to file! {}", e.user_message())
            }
        };
        writeln!(self.prompter.output(), "{}", message)?;
        Ok(true)
    }

    fn handle_load(&mut self) -> Result<bool> {
        let out = self.prompter.output();

        match self.inventory.load(&self.settings.file) {
            Ok(LoadOutcome::NoFile) if self.inventory.is_empty() => {
                writeln!(
                    out,
                    "No existing inventory file found. Starting with empty inventory."
                )?;
            }
            Ok(LoadOutcome::NoFile) => {
                writeln!(
                    out,
                    "No existing inventory file found. Keeping the {} products in memory.",
                    self.inventory.len()
                )?;
            }
            Ok(LoadOutcome::Loaded(summary)) => {
                writeln!(
                    out,
                    "Data loaded from file successfully! ({} products)",
                    summary.loaded
                )?;
                if summary.skipped > 0 {
                    writeln!(
                        out,
                        "Warning: {} invalid entries were skipped.",
                        summary.skipped
                    )?;
                }
            }
            Err(e) => {
                warn!(error = %e, "Load failed");
                writeln!(out, "Error: {}", e.user_message())?;
            }
        }
        Ok(true)
    }

    fn handle_low_stock(&mut self) -> Result<bool> {
        let out = self.prompter.output();
        writeln!(out, "\n=== LOW STOCK ALERT ===")?;

        let low = self.inventory.low_stock(self.settings.low_stock_threshold);
        display::write_low_stock(out, &low)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InventoryError;
    use std::fs;
    use std::io::{self, Cursor};
    use tempfile::TempDir;

    type TestSession = Session<Cursor<Vec<u8>>, Vec<u8>>;

    fn start(temp: &TempDir, input: &str) -> TestSession {
        let settings = Settings {
            file: temp.path().join("inventory.txt"),
            ..Settings::default()
        };
        let prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        Session::start(settings, prompter).unwrap()
    }

    fn output(session: TestSession) -> String {
        String::from_utf8(session.into_output()).unwrap()
    }

    #[test]
    fn test_start_without_file() {
        let temp = TempDir::new().unwrap();
        let session = start(&temp, "");

        assert!(session.inventory().is_empty());
        assert!(output(session).contains("No existing inventory file found"));
    }

    #[test]
    fn test_start_reports_skipped_lines() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("inventory.txt"), "1,Widget,9.99,3\nbroken\n").unwrap();

        let session = start(&temp, "");

        let text = output(session);
        assert!(text.contains("(1 products)"));
        assert!(text.contains("Warning: 1 invalid entries were skipped."));
    }

    #[test]
    fn test_add_then_exit_saves() {
        let temp = TempDir::new().unwrap();
        let mut session = start(&temp, "1\n1\nWidget\n9.99\n3\n\n8\n");

        session.run().unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join("inventory.txt")).unwrap(),
            "1,Widget,9.99,3\n"
        );
        let text = output(session);
        assert!(text.contains("Product added successfully!"));
        assert!(text.contains("Thank you for using Stockroom!"));
    }

    #[test]
    fn test_end_of_input_still_saves() {
        let temp = TempDir::new().unwrap();
        let mut session = start(&temp, "1\n4\nBolt\n0.5\n");

        session.run().unwrap();

        // Input ran out before the quantity; nothing was added
        assert!(session.inventory().is_empty());
        assert!(temp.path().join("inventory.txt").exists());
    }

    #[test]
    fn test_duplicate_id_rejected_early() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("inventory.txt"), "1,Widget,9.99,3\n").unwrap();
        let mut session = start(&temp, "1\n1\n\n8\n");

        session.run().unwrap();

        assert_eq!(session.inventory().len(), 1);
        assert!(output(session).contains("Error: Product with ID 1 already exists!"));
    }

    #[test]
    fn test_invalid_fields_reported() {
        let temp = TempDir::new().unwrap();
        let mut session = start(&temp, "1\n2\n\n1.0\n1\n\n1\n3\nNut\n-2\n1\n\n8\n");

        session.run().unwrap();

        assert!(session.inventory().is_empty());
        let text = output(session);
        assert!(text.contains("Error: Invalid name: cannot be empty"));
        assert!(text.contains("Error: Invalid price: cannot be negative"));
    }

    #[test]
    fn test_update_and_low_stock() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("inventory.txt"),
            "1,Widget,9.99,3\n2,Gadget,5,10\n",
        )
        .unwrap();
        let mut session = start(&temp, "4\n2\n1\n\n4\n2\n-5\n\n7\n\n8\n");

        session.run().unwrap();

        assert_eq!(session.inventory().find_by_id(2).unwrap().quantity(), 1);
        let text = output(session);
        assert!(text.contains("Current quantity: 10"));
        assert!(text.contains("Quantity updated successfully!"));
        assert!(text.contains("Error: Invalid quantity: cannot be negative"));
        assert!(text.contains("1    Widget"));
        assert!(text.contains("2    Gadget"));
    }

    #[test]
    fn test_search_and_update_unknown_id() {
        let temp = TempDir::new().unwrap();
        let mut session = start(&temp, "3\n99\n\n4\n99\n\n8\n");

        session.run().unwrap();

        assert_eq!(output(session).matches("Product with ID 99 not found!").count(), 2);
    }

    #[test]
    fn test_view_empty_inventory() {
        let temp = TempDir::new().unwrap();
        let mut session = start(&temp, "2\n\n8\n");

        session.run().unwrap();

        assert!(output(session).contains("No products in inventory."));
    }

    // Accepts `budget` bytes, then fails like a closed pipe
    struct BrokenPipeWriter {
        budget: usize,
    }

    impl Write for BrokenPipeWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.budget == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            let n = buf.len().min(self.budget);
            self.budget -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_load_without_file_keeps_products() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("inventory.txt");
        let mut inventory = Inventory::new();
        inventory.add(1, "Widget", 9.99, 3).unwrap();
        let settings = Settings {
            file: path.clone(),
            ..Settings::default()
        };
        let prompter = Prompter::new(Cursor::new(b"6\n\n8\n".to_vec()), Vec::new());
        let mut session = Session::new(inventory, settings, prompter);

        session.run().unwrap();

        assert_eq!(session.inventory().len(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "1,Widget,9.99,3\n");
        assert!(output(session).contains("Keeping the 1 products in memory."));
    }

    #[test]
    fn test_unreadable_line_does_not_erase_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("inventory.txt");
        fs::write(&path, b"1,Widget,9.99,3\n2,Caf\xE9,5,10\n3,Bolt,0.5,7\n").unwrap();
        let mut session = start(&temp, "8\n");

        session.run().unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "1,Widget,9.99,3\n3,Bolt,0.5,7\n"
        );
    }

    #[test]
    fn test_console_failure_still_saves() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("inventory.txt");
        let mut inventory = Inventory::new();
        inventory.add(4, "Nut", 0.1, 200).unwrap();
        let settings = Settings {
            file: path.clone(),
            ..Settings::default()
        };
        let prompter = Prompter::new(
            Cursor::new(b"2\n\n8\n".to_vec()),
            BrokenPipeWriter { budget: 40 },
        );
        let mut session = Session::new(inventory, settings, prompter);

        let result = session.run();

        assert!(matches!(result, Err(InventoryError::Io(ref e)) if e.kind() == io::ErrorKind::BrokenPipe));
        assert_eq!(fs::read_to_string(&path).unwrap(), "4,Nut,0.1,200\n");
    }

    #[test]
    fn test_shutdown_save_failure() {
        let temp = TempDir::new().unwrap();
        let settings = Settings {
            file: temp.path().join("missing").join("inventory.txt"),
            ..Settings::default()
        };
        let prompter = Prompter::new(Cursor::new(b"8\n".to_vec()), Vec::new());
        let mut session = Session::new(Inventory::new(), settings, prompter);

        let result = session.run();

        assert!(matches!(result, Err(InventoryError::Io(_))));
    }
}
