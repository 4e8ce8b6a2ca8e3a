/*!

The public API of the library: the vocabulary, instance and state data model, the four element categories, their
denotations, and the syntax trees elements are read from.

*/

pub mod vocabulary;
pub mod instance;
pub mod state;
pub mod element;
pub mod concept;
pub mod role;
pub mod numerical;
pub mod boolean;
pub mod denotation;
pub mod syntax;
