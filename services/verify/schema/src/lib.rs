pub mod product_codes;
