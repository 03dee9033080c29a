//! Compiled-in Angular workspace skeleton.
//!
//! Stands in for `ng new`: the output is a minimal, deterministic Angular
//! workspace with the same shape (and the same legacy tooling) the real
//! generator produces for the requested version.

use serde_json::{Value, json};
use tracing::{debug, instrument};

use hookgen_core::{
    application::ports::{GeneratorRequest, ProjectGenerator},
    domain::{GeneratorOptions, JsonDocument, TreePath, VirtualTree},
    error::HookgenResult,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSkeletonGenerator;

impl BuiltinSkeletonGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ProjectGenerator for BuiltinSkeletonGenerator {
    fn name(&self) -> &'static str {
        "builtin"
    }

    #[instrument(skip_all, fields(project = %request.name, version = %request.options.version))]
    fn generate(&self, request: &GeneratorRequest) -> HookgenResult<VirtualTree> {
        let root = TreePath::root().join(&request.directory)?;
        let name = request.directory.as_str();
        let opts = &request.options;

        let ext = style_extension(opts);

        let mut files: Vec<(String, String)> = vec![
            ("package.json".into(), json_file(package_json(name, &opts.version))),
            ("angular.json".into(), json_file(angular_json(name, opts))),
            ("tsconfig.json".into(), json_file(tsconfig())),
            ("tsconfig.app.json".into(), json_file(tsconfig_app())),
            ("tsconfig.spec.json".into(), json_file(tsconfig_spec())),
            ("tslint.json".into(), json_file(tslint())),
            ("e2e/tsconfig.json".into(), json_file(tsconfig_e2e())),
            ("e2e/protractor.conf.js".into(), PROTRACTOR_CONF.into()),
            (".editorconfig".into(), EDITORCONFIG.into()),
            (".gitignore".into(), GITIGNORE.into()),
            (
                "README.md".into(),
                format!(
                    "# {}\n\nGenerated with Angular CLI {}.\n",
                    request.name.raw(),
                    opts.version
                ),
            ),
            ("src/index.html".into(), index_html(name)),
            ("src/main.ts".into(), MAIN_TS.into()),
            (format!("src/styles.{ext}"), "/* Global styles */\n".into()),
            ("src/app/app.module.ts".into(), app_module(opts.routing)),
        ];
        files.extend(component_files(name, opts));
        if opts.routing {
            files.push(("src/app/app-routing.module.ts".into(), ROUTING_MODULE.into()));
        }

        let mut tree = VirtualTree::new();
        for (path, content) in files {
            tree.create(&root.join(path)?, content)?;
        }

        debug!(files = tree.len(), "Builtin skeleton generated");
        Ok(tree)
    }
}

fn json_file(value: Value) -> String {
    JsonDocument::new(value).to_pretty_string()
}

/// File extension for the configured stylesheet language.
fn style_extension(opts: &GeneratorOptions) -> &str {
    match opts.style.as_str() {
        "css" | "sass" | "less" => opts.style.as_str(),
        _ => "scss",
    }
}

fn package_json(name: &str, version: &str) -> Value {
    let angular = format!("~{version}");
    json!({
        "name": name,
        "version": "0.0.0",
        "scripts": {
            "ng": "ng",
            "start": "ng serve",
            "build": "ng build",
            "test": "ng test",
            "lint": "ng lint",
            "e2e": "ng e2e"
        },
        "private": true,
        "dependencies": {
            "@angular/animations": angular,
            "@angular/common": angular,
            "@angular/compiler": angular,
            "@angular/core": angular,
            "@angular/forms": angular,
            "@angular/platform-browser": angular,
            "@angular/platform-browser-dynamic": angular,
            "@angular/router": angular,
            "rxjs": "~6.6.0",
            "tslib": "^2.0.0",
            "zone.js": "~0.11.3"
        },
        "devDependencies": {
            "@angular-devkit/build-angular": "~0.1102.1",
            "@angular/cli": angular,
            "@angular/compiler-cli": angular,
            "@types/jasmine": "~3.6.0",
            "@types/node": "^12.11.1",
            "codelyzer": "^6.0.0",
            "jasmine-core": "~3.6.0",
            "karma": "~6.1.0",
            "protractor": "~7.0.0",
            "ts-node": "~8.3.0",
            "tslint": "~6.1.0",
            "typescript": "~4.1.2"
        }
    })
}

fn angular_json(name: &str, opts: &GeneratorOptions) -> Value {
    let style = style_extension(opts);
    json!({
        "$schema": "./node_modules/@angular/cli/lib/config/schema.json",
        "version": 1,
        "newProjectRoot": "projects",
        "projects": {
            name: {
                "projectType": "application",
                "schematics": {
                    "@schematics/angular:component": {
                        "style": style,
                        "inlineStyle": opts.inline_style,
                        "inlineTemplate": opts.inline_template
                    }
                },
                "root": "",
                "sourceRoot": "src",
                "prefix": "app",
                "architect": {
                    "build": {
                        "builder": "@angular-devkit/build-angular:browser",
                        "options": {
                            "outputPath": format!("dist/{name}"),
                            "index": "src/index.html",
                            "main": "src/main.ts",
                            "tsConfig": "tsconfig.app.json",
                            "styles": [format!("src/styles.{}", style_extension(opts))]
                        }
                    },
                    "serve": {
                        "builder": "@angular-devkit/build-angular:dev-server",
                        "options": { "browserTarget": format!("{name}:build") }
                    },
                    "test": {
                        "builder": "@angular-devkit/build-angular:karma",
                        "options": { "tsConfig": "tsconfig.spec.json" }
                    },
                    "lint": {
                        "builder": "@angular-devkit/build-angular:tslint",
                        "options": {
                            "tsConfig": ["tsconfig.app.json", "tsconfig.spec.json", "e2e/tsconfig.json"],
                            "exclude": ["**/node_modules/**"]
                        }
                    },
                    "e2e": {
                        "builder": "@angular-devkit/build-angular:protractor",
                        "options": {
                            "protractorConfig": "e2e/protractor.conf.js",
                            "devServerTarget": format!("{name}:serve")
                        }
                    }
                }
            }
        },
        "defaultProject": name
    })
}

fn tsconfig() -> Value {
    json!({
        "compileOnSave": false,
        "compilerOptions": {
            "baseUrl": "./",
            "outDir": "./dist/out-tsc",
            "sourceMap": true,
            "declaration": false,
            "experimentalDecorators": true,
            "moduleResolution": "node",
            "target": "es2015",
            "module": "es2020",
            "lib": ["es2018", "dom"]
        }
    })
}

fn tsconfig_app() -> Value {
    json!({
        "extends": "./tsconfig.json",
        "compilerOptions": { "outDir": "./out-tsc/app", "types": [] },
        "files": ["src/main.ts"],
        "include": ["src/**/*.d.ts"]
    })
}

fn tsconfig_spec() -> Value {
    json!({
        "extends": "./tsconfig.json",
        "compilerOptions": { "outDir": "./out-tsc/spec", "types": ["jasmine"] },
        "include": ["src/**/*.spec.ts", "src/**/*.d.ts"]
    })
}

fn tsconfig_e2e() -> Value {
    json!({
        "extends": "../tsconfig.json",
        "compilerOptions": {
            "outDir": "../out-tsc/e2e",
            "module": "commonjs",
            "target": "es2018",
            "types": ["jasmine", "node"]
        }
    })
}

fn tslint() -> Value {
    json!({
        "extends": "tslint:recommended",
        "rulesDirectory": ["codelyzer"],
        "rules": {
            "component-selector": [true, "element", "app", "kebab-case"],
            "directive-selector": [true, "attribute", "app", "camelCase"]
        }
    })
}

fn index_html(name: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\">\n  <title>{name}</title>\n  <base href=\"/\">\n</head>\n<body>\n  <app-root></app-root>\n</body>\n</html>\n"
    )
}

fn app_module(routing: bool) -> String {
    let (import, module) = if routing {
        (
            "import { AppRoutingModule } from './app-routing.module';\n",
            ",\n    AppRoutingModule",
        )
    } else {
        ("", "")
    };
    format!(
        "import {{ NgModule }} from '@angular/core';\nimport {{ BrowserModule }} from '@angular/platform-browser';\n\n{import}import {{ AppComponent }} from './app.component';\n\n@NgModule({{\n  declarations: [\n    AppComponent\n  ],\n  imports: [\n    BrowserModule{module}\n  ],\n  providers: [],\n  bootstrap: [AppComponent]\n}})\nexport class AppModule {{ }}\n"
    )
}

fn component_files(name: &str, opts: &GeneratorOptions) -> Vec<(String, String)> {
    let style_file = format!("app.component.{}", style_extension(opts));
    let template = if opts.inline_template {
        format!("template: `<h1>{name}</h1>`")
    } else {
        "templateUrl: './app.component.html'".to_string()
    };
    let styles = if opts.inline_style {
        "styles: []".to_string()
    } else {
        format!("styleUrls: ['./{style_file}']")
    };

    let mut files = vec![(
        "src/app/app.component.ts".to_string(),
        format!(
            "import {{ Component }} from '@angular/core';\n\n@Component({{\n  selector: 'app-root',\n  {template},\n  {styles}\n}})\nexport class AppComponent {{\n  title = '{name}';\n}}\n"
        ),
    )];
    if !opts.inline_template {
        let outlet = if opts.routing {
            "<router-outlet></router-outlet>\n"
        } else {
            ""
        };
        files.push((
            "src/app/app.component.html".to_string(),
            format!("<h1>{name}</h1>\n{outlet}"),
        ));
    }
    if !opts.inline_style {
        files.push((format!("src/app/{style_file}"), String::new()));
    }
    files
}

const MAIN_TS: &str = "import { enableProdMode } from '@angular/core';
import { platformBrowserDynamic } from '@angular/platform-browser-dynamic';

import { AppModule } from './app/app.module';

platformBrowserDynamic().bootstrapModule(AppModule)
  .catch(err => console.error(err));
";

const ROUTING_MODULE: &str = "import { NgModule } from '@angular/core';
import { RouterModule, Routes } from '@angular/router';

const routes: Routes = [];

@NgModule({
  imports: [RouterModule.forRoot(routes)],
  exports: [RouterModule]
})
export class AppRoutingModule { }
";

const PROTRACTOR_CONF: &str = "exports.config = {
  allScriptsTimeout: 11000,
  specs: ['./src/**/*.e2e-spec.ts'],
  capabilities: { browserName: 'chrome' },
  directConnect: true,
  framework: 'jasmine'
};
";

const EDITORCONFIG: &str = "root = true

[*]
charset = utf-8
indent_style = space
indent_size = 2
insert_final_newline = true
trim_trailing_whitespace = true
";

const GITIGNORE: &str = "/dist
/tmp
/out-tsc
/node_modules
/.angular/cache
/coverage
";
