pub mod gurps;
