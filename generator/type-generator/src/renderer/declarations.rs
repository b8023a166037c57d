use crate::GeneratorConfig;
use itertools::Itertools;
use std::fmt;

const INDENT: &str = "  ";
const RESOLVER_INDEX: &str = "{ [key: string]: Resolver<any, any, any> }";

/// One member of an interface or object type.
///
/// ```ignore
/// where?: UserWhereInput | null
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    name: String,
    optional: bool,
    nullable: bool,
    r#type: String,
}

impl Member {
    pub fn new(name: impl Into<String>, r#type: impl ToString) -> Self {
        Self {
            name: name.into(),
            optional: false,
            nullable: false,
            r#type: r#type.to_string(),
        }
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let optional = if self.optional { "?" } else { "" };
        let null = if self.nullable { " | null" } else { "" };

        write!(f, "{}{optional}: {}{null}", self.name, self.r#type)
    }
}

fn write_members(f: &mut fmt::Formatter<'_>, members: &[Member]) -> fmt::Result {
    f.write_str("{\n")?;

    for member in members {
        writeln!(f, "{INDENT}{member}")?;
    }

    f.write_str("}")
}

/// Imports and the `Resolver` helper every resolver map refers to.
#[derive(Debug)]
pub struct Header<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> Header<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }
}

impl fmt::Display for Header<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "import * as Client from '{}'", self.config.client_import)?;
        writeln!(f, "import {{ Context }} from '{}'", self.config.context_import)?;
        writeln!(f, "import {{ GraphQLResolveInfo }} from 'graphql'")?;
        writeln!(f)?;
        writeln!(f, "type Resolver<T extends {{}}, A extends {{}}, R extends any> = (")?;

        for param in ["parent: T", "args: A", "context: Context", "info: GraphQLResolveInfo"] {
            writeln!(f, "{INDENT}{param},")?;
        }

        f.write_str(") => Promise<R>")
    }
}

/// The `Resolvers` type, listing the resolver map of every output type.
#[derive(Debug, Default)]
pub struct ResolversIndex<'a> {
    types: Vec<&'a str>,
}

impl<'a> ResolversIndex<'a> {
    pub fn push(&mut self, type_name: &'a str) {
        self.types.push(type_name);
    }
}

impl fmt::Display for ResolversIndex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "export type Resolvers = {{")?;
        writeln!(f, "{INDENT}[key: string]: {RESOLVER_INDEX}")?;
        f.write_str("} & ")?;

        let members = self
            .types
            .iter()
            .map(|name| Member::new(*name, name).optional(true))
            .collect_vec();

        write_members(f, &members)
    }
}

/// The resolvers of one output type.
///
/// ```ignore
/// export type User = { [key: string]: Resolver<any, any, any> } & {
///   posts?: Resolver<Client.User, UserPostsArgs, Client.Post[]>
/// }
/// ```
#[derive(Debug)]
pub struct ResolverMap<'a> {
    name: &'a str,
    members: Vec<Member>,
}

impl<'a> ResolverMap<'a> {
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            members: Vec::new(),
        }
    }

    pub fn push_member(&mut self, member: Member) {
        self.members.push(member);
    }
}

impl fmt::Display for ResolverMap<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "export type {} = {RESOLVER_INDEX} & ", self.name)?;
        write_members(f, &self.members)
    }
}

#[derive(Debug)]
pub struct Interface {
    name: String,
    members: Vec<Member>,
}

impl Interface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn push_member(&mut self, member: Member) {
        self.members.push(member);
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "export interface {} ", self.name)?;
        write_members(f, &self.members)
    }
}

/// A string enum, every value standing for itself.
#[derive(Debug)]
pub struct Enum<'a> {
    name: &'a str,
    values: &'a [String],
}

impl<'a> Enum<'a> {
    pub fn new(name: &'a str, values: &'a [String]) -> Self {
        Self { name, values }
    }
}

impl fmt::Display for Enum<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "export enum {} {{", self.name)?;

        for value in self.values {
            writeln!(f, "{INDENT}{value} = '{value}',")?;
        }

        f.write_str("}")
    }
}

/// Declarations of one kind, separated by an empty line.
pub struct Section<T>(pub Vec<T>);

impl<T: fmt::Display> fmt::Display for Section<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().format("\n\n"))
    }
}
