/// Placeholder used when the provider has no display name for a symbol
pub const COMPANY_NAME_UNAVAILABLE: &str = "Company name unavailable";

/// Prompt shown on the home page before any lookup
pub const TICKER_PROMPT: &str = "Enter the ticker symbol above to get stock data!";

/// Home page lookup submitted without a ticker
pub const EMPTY_TICKER_MESSAGE: &str =
    "Ticker symbol cannot be empty! Please enter a valid ticker symbol.";

/// Watchlist add form submitted without a ticker
pub const INVALID_FORM_MESSAGE: &str = "Form is not valid, please check your input.";

/// Watchlist add rejected because the ticker is already stored
pub const DUPLICATE_TICKER_MESSAGE: &str = "Ticker already exists in the database.";

/// Watchlist entry removed
pub const STOCK_DELETED_MESSAGE: &str = "Stock has been deleted!";

/// Number of trading days shown per quote
pub const RECENT_TRADING_DAYS: usize = 5;
