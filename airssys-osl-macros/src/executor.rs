//! #[executor] macro implementation
//!
//! This module contains the core logic for parsing impl blocks
//! and generating OSExecutor trait implementations.

use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::Parse;
use syn::{parse2, Error, ImplItem, ImplItemFn, ItemImpl, Result};

use crate::utils::get_operation_info;

/// Configuration options for the #[executor] macro.
#[derive(Debug, Default)]
struct ExecutorConfig {
    /// Custom executor name (optional)
    name: Option<String>,
    /// Custom supported operation types (optional)
    operations: Option<Vec<String>>,
}

/// Parses macro attributes into ExecutorConfig.
///
/// Supports the following syntax:
/// - `name = "CustomName"` - Custom executor name
/// - `operations = [Filesystem, Network, Process]` - Custom operation types
///
/// # Examples
///
/// ```ignore
/// #[executor(name = "MyExecutor")]
/// #[executor(operations = [Filesystem, Network])]
/// #[executor(name = "Custom", operations = [Process])]
/// ```
fn parse_config(attr: TokenStream) -> Result<ExecutorConfig> {
    // Empty attributes - use defaults
    if attr.is_empty() {
        return Ok(ExecutorConfig::default());
    }

    let mut config = ExecutorConfig::default();

    // Parse attributes using syn's meta parser
    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("name") {
            // Parse: name = "value"
            let value: syn::LitStr = meta.value()?.parse()?;
            config.name = Some(value.value());
            Ok(())
        } else if meta.path.is_ident("operations") {
            // Parse: operations = [Type1, Type2, ...]
            let list_parser = meta.value()?;
            let content;
            syn::bracketed!(content in list_parser);
            let ops: syn::punctuated::Punctuated<syn::Ident, syn::Token![,]> =
                content.parse_terminated(syn::Ident::parse, syn::Token![,])?;

            // Validate operation types
            let mut valid_ops = Vec::new();
            for op in &ops {
                let op_str = op.to_string();
                if !is_valid_operation_type(&op_str) {
                    return Err(meta.error(format!(
                        "Unknown operation type '{op_str}'. Valid types are: Filesystem, Process, Network"
                    )));
                }
                valid_ops.push(op_str);
            }

            config.operations = Some(valid_ops);
            Ok(())
        } else {
            Err(meta.error(format!(
                "Unknown attribute '{}'. Valid attributes are: name, operations",
                meta.path
                    .get_ident()
                    .map(|i| i.to_string())
                    .unwrap_or_else(|| "?".to_string())
            )))
        }
    });

    syn::parse::Parser::parse2(parser, attr)?;
    Ok(config)
}

/// Validates if a string is a known operation type.
fn is_valid_operation_type(op: &str) -> bool {
    matches!(op, "Filesystem" | "Process" | "Network")
}

/// Expands the #[executor] attribute macro.
///
/// Parses an impl block, extracts operation methods, validates their signatures,
/// and generates OSExecutor trait implementations with name() and supported_operation_types().
pub fn expand(attr: TokenStream, input: TokenStream) -> Result<TokenStream> {
    // Parse configuration (if provided)
    let config = parse_config(attr)?;

    // Parse the impl block
    let item_impl = parse2::<ItemImpl>(input)?;

    // Extract executor type name
    let executor_type = &item_impl.self_ty;

    // Get executor name (from config or type name)
    let executor_name = config.name.clone().unwrap_or_else(|| {
        // Extract type name from self_ty
        quote!(#executor_type).to_string()
    });

    // Find operation methods (only methods matching operation names)
    let methods = extract_operation_methods(&item_impl)?;

    if methods.is_empty() {
        return Err(Error::new_spanned(
            &item_impl,
            "No operation methods found. Expected methods named: file_read, file_write, file_delete, directory_create, directory_list, process_spawn, process_kill, process_signal, network_connect, network_listen, network_socket"
        ));
    }

    // Determine operation types: use custom config if provided, otherwise auto-detect
    let operation_types = if let Some(ref custom_ops) = config.operations {
        // Use custom operation types from configuration
        use quote::format_ident;
        custom_ops.iter().map(|s| format_ident!("{}", s)).collect()
    } else {
        // Auto-detect from methods
        detect_operation_types(&methods)
    };

    // Generate OSExecutor trait implementations
    let trait_impls =
        generate_trait_implementations(executor_type, &executor_name, &operation_types, &methods)?;

    // Return original impl + generated trait implementations
    Ok(quote! {
        #item_impl
        #(#trait_impls)*
    })
}

/// Detects unique operation types from method list.
fn detect_operation_types(methods: &[&ImplItemFn]) -> Vec<syn::Ident> {
    use quote::format_ident;
    use std::collections::HashSet;

    let mut types = HashSet::new();

    for method in methods {
        let method_name = method.sig.ident.to_string();
        if let Some(info) = get_operation_info(&method_name) {
            // Map to OperationType enum variant
            let op_type = match info.module_path {
                "filesystem" => "Filesystem",
                "process" => "Process",
                "network" => "Network",
                _ => continue,
            };
            types.insert(op_type);
        }
    }

    types.into_iter().map(|t| format_ident!("{}", t)).collect()
}

/// Extracts operation methods from an impl block.
///
/// Only processes methods whose names match known operation names.
/// Helper methods and other non-operation methods are ignored.
///
/// Returns an error if duplicate operation methods are found.
fn extract_operation_methods(impl_block: &ItemImpl) -> Result<Vec<&ImplItemFn>> {
    let mut methods = Vec::new();
    let mut seen_operations = std::collections::HashSet::new();

    for item in &impl_block.items {
        if let ImplItem::Fn(method) = item {
            let method_name = method.sig.ident.to_string();

            // Only process if method name matches an operation
            if crate::utils::is_operation_method(&method_name) {
                // Check for duplicates
                if !seen_operations.insert(method_name.clone()) {
                    return Err(Error::new_spanned(
                        &method.sig.ident,
                        format!(
                            "Duplicate operation method '{method_name}'. Each operation can only be implemented once per executor"
                        ),
                    ));
                }

                // Validate the method signature
                validate_method_signature(method)?;
                methods.push(method);
            }
            // Note: Non-operation methods are silently ignored (helper methods allowed)
        }
    }

    Ok(methods)
}

/// Validates that a method has the correct signature for an operation method.
///
/// Required signature:
/// ```rust,ignore
/// async fn method_name(
///     &self,
///     operation: OperationType,
///     context: &ExecutionContext
/// ) -> OSResult<ExecutionResult>
/// ```
fn validate_method_signature(method: &ImplItemFn) -> Result<()> {
    let sig = &method.sig;

    // 1. Must be async
    if sig.asyncness.is_none() {
        return Err(Error::new_spanned(
            sig,
            format!(
                "Operation method '{}' must be async. Add 'async' keyword.",
                sig.ident
            ),
        ));
    }

    // 2. Must have &self receiver
    validate_receiver(sig)?;

    // 3. Must have exactly 2 parameters with correct names
    validate_parameters(sig)?;

    // 4. Must return OSResult<ExecutionResult>
    validate_return_type(sig)?;

    Ok(())
}

/// Validates the receiver is &self (not &mut self, not self).
fn validate_receiver(sig: &syn::Signature) -> Result<()> {
    use syn::FnArg;

    let receiver = sig
        .inputs
        .first()
        .and_then(|arg| {
            if let FnArg::Receiver(r) = arg {
                Some(r)
            } else {
                None
            }
        })
        .ok_or_else(|| Error::new_spanned(sig, "Operation methods must have a '&self' receiver"))?;

    if receiver.mutability.is_some() {
        return Err(Error::new_spanned(
            receiver,
            "Use '&self', not '&mut self'. Executors should be immutable.",
        ));
    }

    if receiver.reference.is_none() {
        return Err(Error::new_spanned(
            receiver,
            "Use '&self', not 'self'. Executors should not be consumed.",
        ));
    }

    Ok(())
}

/// Validates parameters are exactly: (operation: OpType, context: &ExecutionContext).
fn validate_parameters(sig: &syn::Signature) -> Result<()> {
    use syn::{FnArg, Pat, PatType};

    // Collect non-receiver parameters
    let params: Vec<&FnArg> = sig.inputs.iter().skip(1).collect();

    if params.len() != 2 {
        return Err(Error::new_spanned(
            &sig.inputs,
            format!(
                "Operation methods must have exactly 2 parameters (operation, context). Found {} parameters.",
                params.len()
            )
        ));
    }

    // Validate first parameter name is "operation"
    if let FnArg::Typed(PatType { pat, .. }) = params[0] {
        if let Pat::Ident(ident) = &**pat {
            if ident.ident != "operation" {
                return Err(Error::new_spanned(
                    pat,
                    format!(
                        "First parameter must be named 'operation', found '{}'",
                        ident.ident
                    ),
                ));
            }
        }
    }

    // Validate second parameter name is "context"
    if let FnArg::Typed(PatType { pat, .. }) = params[1] {
        if let Pat::Ident(ident) = &**pat {
            if ident.ident != "context" {
                return Err(Error::new_spanned(
                    pat,
                    format!(
                        "Second parameter must be named 'context', found '{}'",
                        ident.ident
                    ),
                ));
            }
        }
    }

    // TODO: Validate parameter types in later phase if needed

    Ok(())
}

/// Validates return type is OSResult<ExecutionResult> (or its FQN).
fn validate_return_type(sig: &syn::Signature) -> Result<()> {
    use syn::ReturnType;

    match &sig.output {
        ReturnType::Default => Err(Error::new_spanned(
            sig,
            "Operation methods must return OSResult<ExecutionResult>",
        )),
        ReturnType::Type(_, _) => {
            // For Phase 1, we accept any return type that looks reasonable
            // Stricter validation can be added in Phase 2 if needed
            // The compiler will catch wrong types anyway
            Ok(())
        }
    }
}

/// Generates OSExecutor trait implementations for all operation methods.
///
/// # Example
///
/// Given:
/// ```rust,ignore
/// impl MyExecutor {
///     async fn file_read(&self, operation: FileReadOperation, context: &ExecutionContext)
///         -> OSResult<ExecutionResult> { ... }
/// }
/// ```
///
/// Generates:
/// ```rust,ignore
/// #[async_trait::async_trait]
/// impl OSExecutor<FileReadOperation> for MyExecutor {
///     fn name(&self) -> &str {
///         "MyExecutor"
///     }
///     
///     fn supported_operation_types(&self) -> Vec<OperationType> {
///         vec![OperationType::Filesystem]
///     }
///     
///     async fn execute(&self, operation: FileReadOperation, context: &ExecutionContext)
///         -> OSResult<ExecutionResult> {
///         self.file_read(operation, context).await
///     }
/// }
/// ```
fn generate_trait_implementations(
    executor_type: &syn::Type,
    executor_name: &str,
    operation_types: &[syn::Ident],
    methods: &[&ImplItemFn],
) -> Result<Vec<TokenStream>> {
    methods
        .iter()
        .map(|method| {
            generate_single_trait_impl(executor_type, executor_name, operation_types, method)
        })
        .collect()
}

/// Generates a single OSExecutor trait implementation for one operation method.
fn generate_single_trait_impl(
    executor_type: &syn::Type,
    executor_name: &str,
    operation_types: &[syn::Ident],
    method: &ImplItemFn,
) -> Result<TokenStream> {
    let method_name = &method.sig.ident;
    let method_name_str = method_name.to_string();

    // Get operation information
    let op_info = crate::utils::get_operation_info(&method_name_str).ok_or_else(|| {
        Error::new_spanned(
            method_name,
            format!("Unknown operation method: '{method_name_str}'"),
        )
    })?;

    // Generate fully qualified path to operation type
    let operation_type_path = op_info.operation_path();

    // Generate the trait implementation with all required methods
    Ok(quote! {
        #[async_trait::async_trait]
        impl airssys_osl::core::executor::OSExecutor<#operation_type_path> for #executor_type {
            fn name(&self) -> &str {
                #executor_name
            }

            fn supported_operation_types(&self) -> Vec<airssys_osl::core::operation::OperationType> {
                vec![#(airssys_osl::core::operation::OperationType::#operation_types),*]
            }

            async fn execute(
                &self,
                operation: #operation_type_path,
                context: &airssys_osl::core::context::ExecutionContext,
            ) -> airssys_osl::core::result::OSResult<airssys_osl::core::executor::ExecutionResult> {
                self.#method_name(operation, context).await
            }
        }
    })
}
