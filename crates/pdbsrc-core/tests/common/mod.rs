pub mod pdb_builder;
