use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

/// Options for JSX compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Name of the exported component function
    pub component_name: String,
    /// One element per line with indentation; otherwise elements are
    /// emitted back to back
    pub pretty: bool,
    /// Wrap the document in `<Tailwind>` when any element has a className
    pub tailwind_wrapper: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            component_name: "Email".to_string(),
            pretty: true,
            tailwind_wrapper: true,
        }
    }
}

/// Compilation context for managing state during code generation
pub struct CompilerContext {
    buffer: Rc<RefCell<String>>,
    indent_level: Rc<RefCell<usize>>,
    imports: Rc<RefCell<BTreeSet<String>>>,
    pub options: CompileOptions,
}

impl CompilerContext {
    pub fn new(options: CompileOptions) -> Self {
        Self {
            buffer: Rc::new(RefCell::new(String::new())),
            indent_level: Rc::new(RefCell::new(0)),
            imports: Rc::new(RefCell::new(BTreeSet::new())),
            options,
        }
    }

    pub fn add(&self, text: &str) {
        self.buffer.borrow_mut().push_str(text);
    }

    pub fn add_line(&self, text: &str) {
        self.add_indented(text);
        self.add("\n");
    }

    pub fn add_indented(&self, text: &str) {
        let indent = "  ".repeat(*self.indent_level.borrow());
        self.buffer.borrow_mut().push_str(&indent);
        self.buffer.borrow_mut().push_str(text);
    }

    /// A line of element markup, laid out according to `options.pretty`.
    pub fn add_markup(&self, text: &str) {
        if self.options.pretty {
            self.add_line(text);
        } else {
            self.add(text);
        }
    }

    pub fn indent(&self) {
        *self.indent_level.borrow_mut() += 1;
    }

    pub fn dedent(&self) {
        let mut level = self.indent_level.borrow_mut();
        if *level > 0 {
            *level -= 1;
        }
    }

    /// Record a name imported from the component package.
    pub fn use_import(&self, name: &str) {
        self.imports.borrow_mut().insert(name.to_string());
    }

    /// Imports recorded so far, sorted.
    pub fn imports(&self) -> Vec<String> {
        self.imports.borrow().iter().cloned().collect()
    }

    pub fn get_output(&self) -> String {
        self.buffer.borrow().clone()
    }

    /// Fresh buffer sharing indentation and imports with `self`.
    pub fn with_new_buffer(&self) -> Self {
        Self {
            buffer: Rc::new(RefCell::new(String::new())),
            indent_level: self.indent_level.clone(),
            imports: self.imports.clone(),
            options: self.options.clone(),
        }
    }

    pub fn merge_buffer(&self, other: &CompilerContext) {
        self.buffer.borrow_mut().push_str(&other.buffer.borrow());
    }
}
