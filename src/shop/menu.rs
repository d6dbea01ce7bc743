use std::fmt;

/// Options offered by the main menu
///
/// Every option except `Exit` returns to the menu once handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ViewInventory,
    AddProduct,
    UpdateProduct,
    MakeSale,
    ViewSales,
    Exit,
}

impl MenuChoice {
    /// All options in the order they are listed
    pub const ALL: [MenuChoice; 6] = [
        MenuChoice::ViewInventory,
        MenuChoice::AddProduct,
        MenuChoice::UpdateProduct,
        MenuChoice::MakeSale,
        MenuChoice::ViewSales,
        MenuChoice::Exit,
    ];

    /// Key the operator types to pick this option
    pub fn key(&self) -> &'static str {
        match self {
            MenuChoice::ViewInventory => "1",
            MenuChoice::AddProduct => "2",
            MenuChoice::UpdateProduct => "3",
            MenuChoice::MakeSale => "4",
            MenuChoice::ViewSales => "5",
            MenuChoice::Exit => "6",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::ViewInventory => "View Inventory",
            MenuChoice::AddProduct => "Add Product to Inventory",
            MenuChoice::UpdateProduct => "Update Product in Inventory",
            MenuChoice::MakeSale => "Make a Sale",
            MenuChoice::ViewSales => "View Sales Report",
            MenuChoice::Exit => "Exit",
        }
    }

    /// Parse the operator's answer to the menu prompt
    pub fn from_input(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::ALL.into_iter().find(|choice| choice.key() == input)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, MenuChoice::Exit)
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.key(), self.label())
    }
}
