/// Interactive menu entries
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddProduct,
    ViewAll,
    Search,
    UpdateQuantity,
    Save,
    Load,
    LowStock,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 8] = [
        MenuChoice::AddProduct,
        MenuChoice::ViewAll,
        MenuChoice::Search,
        MenuChoice::UpdateQuantity,
        MenuChoice::Save,
        MenuChoice::Load,
        MenuChoice::LowStock,
        MenuChoice::Exit,
    ];

    /// Number the user types to pick this entry
    pub fn number(&self) -> usize {
        match self {
            MenuChoice::AddProduct => 1,
            MenuChoice::ViewAll => 2,
            MenuChoice::Search => 3,
            MenuChoice::UpdateQuantity => 4,
            MenuChoice::Save => 5,
            MenuChoice::Load => 6,
            MenuChoice::LowStock => 7,
            MenuChoice::Exit => 8,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            MenuChoice::AddProduct => "Add New Product",
            MenuChoice::ViewAll => "View All Products",
            MenuChoice::Search => "Search Product by ID",
            MenuChoice::UpdateQuantity => "Update Product Quantity",
            MenuChoice::Save => "Save Data to File",
            MenuChoice::Load => "Load Data from File",
            MenuChoice::LowStock => "View Low Stock Products",
            MenuChoice::Exit => "Exit",
        }
    }
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number: usize = s.trim().parse().map_err(|_| ())?;
        MenuChoice::ALL
            .iter()
            .copied()
            .find(|choice| choice.number() == number)
            .ok_or(())
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}
