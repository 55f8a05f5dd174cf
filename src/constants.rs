//! Application constants for the transaction cleaner
//!
//! File names, column names and default values shared by the pipeline,
//! the validator and the CLI.

// =============================================================================
// File Names
// =============================================================================

/// Raw transaction export read when no input path is given
pub const SOURCE_FILE_NAME: &str = "datacamp_ecommerce.csv";

/// Cleaned file written when no output path is given
pub const OUTPUT_FILE_NAME: &str = "cleaned_ecommerce_data.csv";

// =============================================================================
// Source Columns
// =============================================================================

pub mod source_columns {
    pub const INVOICE_NO: &str = "InvoiceNo";
    pub const STOCK_CODE: &str = "StockCode";
    pub const DESCRIPTION: &str = "Description";
    pub const QUANTITY: &str = "Quantity";
    pub const INVOICE_DATE: &str = "InvoiceDate";
    pub const UNIT_PRICE: &str = "UnitPrice";
    pub const CUSTOMER_ID: &str = "CustomerID";
    pub const COUNTRY: &str = "Country";

    /// Columns every source export must carry
    pub const REQUIRED: &[&str] = &[
        INVOICE_NO,
        INVOICE_DATE,
        STOCK_CODE,
        DESCRIPTION,
        UNIT_PRICE,
        CUSTOMER_ID,
        QUANTITY,
        COUNTRY,
    ];
}

// =============================================================================
// Standardised Columns
// =============================================================================

pub mod columns {
    pub const ORDER_ID: &str = "OrderID";
    pub const ORDER_DATE: &str = "OrderDate";
    pub const ORDER_YEAR: &str = "OrderYear";
    pub const ORDER_MONTH: &str = "OrderMonth";
    pub const YEAR_MONTH: &str = "YearMonth";
    pub const CUSTOMER_ID: &str = "CustomerID";
    pub const COUNTRY: &str = "Country";
    pub const PRODUCT_ID: &str = "ProductID";
    pub const PRODUCT_NAME: &str = "ProductName";
    pub const QUANTITY: &str = "Quantity";
    pub const UNIT_PRICE: &str = "UnitPrice";
    pub const SALE_PRICE: &str = "SalePrice";

    /// Final column selection, in output order
    pub const OUTPUT: &[&str] = &[
        ORDER_ID,
        ORDER_DATE,
        ORDER_YEAR,
        ORDER_MONTH,
        YEAR_MONTH,
        CUSTOMER_ID,
        COUNTRY,
        PRODUCT_ID,
        PRODUCT_NAME,
        QUANTITY,
        UNIT_PRICE,
        SALE_PRICE,
    ];
}

/// Source name to standardised name. `UnitPrice` maps onto itself.
pub const COLUMN_RENAMES: &[(&str, &str)] = &[
    (source_columns::INVOICE_NO, columns::ORDER_ID),
    (source_columns::INVOICE_DATE, columns::ORDER_DATE),
    (source_columns::STOCK_CODE, columns::PRODUCT_ID),
    (source_columns::DESCRIPTION, columns::PRODUCT_NAME),
    (source_columns::UNIT_PRICE, columns::UNIT_PRICE),
];

// =============================================================================
// Missing Values
// =============================================================================

/// Cell values read as missing, in addition to empty and blank cells.
/// Matches the NA markers common spreadsheet and dataframe exports write.
pub const MISSING_VALUE_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// =============================================================================
// Dates
// =============================================================================

/// Accepted `OrderDate` layouts, tried in order
pub const DEFAULT_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%d",
];

/// Layout used when writing `OrderDate` back out
pub const OUTPUT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Layout of the `YearMonth` bucket key
pub const YEAR_MONTH_FORMAT: &str = "%Y-%m";

// =============================================================================
// Reporting
// =============================================================================

/// Rows shown in the final preview
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Offending values quoted in a coercion or date error
pub const MAX_ERROR_SAMPLES: usize = 5;
