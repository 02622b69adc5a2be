use crate::SkillIndicator;

pub(crate) const MACHINE_LEARNING: SkillIndicator = SkillIndicator {
    packages: &[
        "tensorflow", "tf", "keras", "torch", "pytorch", "sklearn", "scikit-learn", "xgboost",
        "lightgbm", "catboost", "transformers", "huggingface", "fastai", "mxnet", "jax", "flax",
        "stable-baselines3", "ray", "mlflow", "wandb", "tensorboard", "optuna", "hyperopt",
        "sacred", "comet_ml", "onnx", "tensorrt", "tflite", "tensorflow.js", "@tensorflow/tfjs",
        "brain.js", "ml5", "synaptic", "convnetjs", "weka", "deeplearning4j", "dl4j", "mallet",
        "caret", "mlr", "mlr3", "randomforest", "dlib", "mlpack", "shark",
    ],
    file_patterns: &[
        "model.pkl", "model.h5", "model.pt", "model.pth", "*.onnx", "*.tflite", "*.pb", "*.pmml",
        "train.*", "training.*", "inference.*", "predict.*", "model.*", "model_*", "*_model.*",
        "requirements.txt", "environment.yml", "conda.yml", "*.ipynb", "*.rmd",
    ],
    file_extensions: &[
        ".ipynb", ".pkl", ".h5", ".pt", ".pth", ".pb", ".onnx", ".tflite", ".pmml", ".rmd",
    ],
    keywords: &[
        "neural_network", "deep_learning", "training", "inference", "model", "dataset", "epoch",
        "batch_size", "learning_rate", "classifier", "regression", "prediction", "accuracy",
    ],
};

pub(crate) const DATA_ANALYTICS: SkillIndicator = SkillIndicator {
    packages: &[
        "pandas", "numpy", "polars", "dask", "modin", "matplotlib", "seaborn", "plotly", "bokeh",
        "altair", "dash", "streamlit", "gradio", "scipy", "statsmodels", "pingouin", "pyspark",
        "spark", "arrow", "pyarrow", "duckdb", "jupyter", "ipython", "notebook", "d3", "d3.js",
        "chart.js", "chartjs", "highcharts", "plotly.js", "echarts", "vega", "vega-lite",
        "ggplot2", "dplyr", "tidyr", "shiny", "tidyverse", "jfreechart", "tablesaw",
    ],
    file_patterns: &[
        "*.ipynb", "*.rmd", "analysis.*", "analyze.*", "*_analysis.*", "viz.*", "visualize.*",
        "visualization.*", "*_viz.*", "dashboard.*", "*_dashboard.*", "report.*", "*_report.*",
        "eda.*", "*_eda.*", "exploratory.*", "*.csv", "*.parquet", "*.feather", "*.arrow",
        "*.pbix", "*.twb", "*.twbx",
    ],
    file_extensions: &[
        ".ipynb", ".rmd", ".csv", ".parquet", ".feather", ".arrow", ".pbix", ".twb", ".twbx",
        ".xlsx", ".xlsm",
    ],
    keywords: &[
        "dataframe", "visualization", "analysis", "dashboard", "exploratory", "statistical",
        "correlation", "distribution", "analytics", "metrics", "insights", "reporting",
    ],
};

pub(crate) const DEVOPS: SkillIndicator = SkillIndicator {
    packages: &[
        "ansible", "salt", "puppet", "chef", "prometheus", "grafana", "datadog", "newrelic",
        "sentry", "elasticsearch", "logstash", "kibana", "fabric", "invoke", "paramiko",
        "capistrano", "rake", "pm2", "forever", "nodemon",
    ],
    file_patterns: &[
        "deploy*", "deployment*", "setup*", "install*", "playbook*", "ansible*", "*.ansible",
        "monitor*", "alert*", "logging*", "build*", "make*", "rake*", "Vagrantfile", "Berksfile",
    ],
    file_extensions: &[".sh", ".bash", ".zsh", ".ps1", ".bat", ".cmd"],
    keywords: &[
        "deployment", "monitoring", "logging", "orchestration", "automation", "provisioning",
        "configuration", "infrastructure",
    ],
};

pub(crate) const CI_CD: SkillIndicator = SkillIndicator {
    packages: &[
        "pytest", "unittest", "nose", "tox", "jest", "mocha", "jasmine", "karma", "cypress",
        "junit", "testng", "mockito", "rspec", "minitest", "phpunit", "jenkins", "travis",
        "gitlab", "github", "circleci", "actions",
    ],
    file_patterns: &[
        ".github/workflows/*", "*.github-workflow.yml", ".gitlab-ci.yml", ".gitlab-ci.yaml",
        "Jenkinsfile", "Jenkinsfile.*", ".travis.yml", ".circleci/*", "circle.yml",
        "azure-pipelines.yml", "azure-pipelines.yaml", "bitbucket-pipelines.yml", "pipeline*",
        "build*", "test*", "Makefile", "makefile", "*.mk", "Rakefile", "Gruntfile*", "Gulpfile*",
        "webpack.config.*", "rollup.config.*", "vite.config.*",
    ],
    file_extensions: &[".yml", ".yaml", ".mk"],
    keywords: &[
        "pipeline", "workflow", "build", "deploy", "test", "continuous_integration",
        "continuous_deployment", "ci", "cd", "automation", "release",
    ],
};

pub(crate) const CONTAINERIZATION: SkillIndicator = SkillIndicator {
    packages: &["docker", "podman", "kubernetes", "k8s", "docker-compose", "helm"],
    file_patterns: &[
        "Dockerfile", "Dockerfile.*", "docker-compose*.yml", "docker-compose*.yaml",
        ".dockerignore", "deployment*.yaml", "deployment*.yml", "service*.yaml", "service*.yml",
        "pod*.yaml", "pod*.yml",
    ],
    file_extensions: &[],
    keywords: &[
        "container", "image", "orchestration", "pod", "deployment", "service", "ingress",
        "namespace",
    ],
};

pub(crate) const CLOUD_COMPUTING: SkillIndicator = SkillIndicator {
    packages: &[
        "boto3", "botocore", "awscli", "aws", "azure", "azure-storage", "azure-functions",
        "google-cloud", "gcloud", "gcp", "s3fs", "adlfs", "gcsfs", "aws-sdk", "@aws-sdk",
        "@azure", "@google-cloud", "firebase", "firebase-admin", "aws-java-sdk", "azure-sdk",
        "google-cloud-java", "awssdk", "azure.storage", "google.cloud",
    ],
    file_patterns: &[
        "lambda_*", "lambda.*", "*_lambda.*", "handler.*", "function_*", "function.*",
        "*_function.*", "function.json", "cloud_*", "gcf_*", "aws_*", "azure_*", "gcp_*",
        "cloud*", "serverless.yml", "serverless.yaml", "serverless.json",
    ],
    file_extensions: &[".tf", ".tfvars"],
    keywords: &[
        "lambda", "function", "serverless", "bucket", "s3", "blob", "storage", "compute",
        "instance", "cloud", "aws", "azure", "gcp", "firebase",
    ],
};

pub(crate) const DATABASE: SkillIndicator = SkillIndicator {
    packages: &[
        "psycopg2", "pymysql", "sqlite3", "sqlalchemy", "django", "flask-sqlalchemy", "peewee",
        "pony", "tortoise", "pymongo", "redis", "cassandra", "neo4j", "elasticsearch", "mongoose",
        "sequelize", "typeorm", "prisma", "knex", "pg", "mysql", "mysql2", "mongodb",
        "hibernate", "jdbc", "jpa", "mybatis", "entityframework", "dapper", "activerecord",
        "sequel", "mongoid", "doctrine", "eloquent", "pdo",
    ],
    file_patterns: &[
        "*.sql", "schema*", "migration*", "seed*", "*_migration.*", "migrations/*", "model*",
        "models/*", "*_model.*", "db*", "database*", "*_db.*", "changelog*", "flyway*",
        "liquibase*",
    ],
    file_extensions: &[".sql", ".ddl", ".dml"],
    keywords: &[
        "database", "query", "migration", "schema", "table", "index", "transaction", "orm",
        "sql", "select", "insert", "update", "delete", "join",
    ],
};

pub(crate) const TESTING: SkillIndicator = SkillIndicator {
    packages: &[
        "pytest", "unittest", "nose", "mock", "faker", "hypothesis", "coverage", "tox", "jest",
        "mocha", "chai", "jasmine", "karma", "enzyme", "@testing-library", "vitest", "selenium",
        "playwright", "puppeteer", "cypress", "webdriver", "webdriverio", "junit", "testng",
        "mockito", "assertj", "rspec", "minitest", "capybara", "phpunit", "codeception",
        "nunit", "xunit", "mstest", "testify", "gomock",
    ],
    file_patterns: &[
        "test_*", "*_test.*", "*.test.*", "*.spec.*", "tests/*", "test/*", "__tests__/*",
        "spec/*", "conftest.*", "pytest.ini", "tox.ini", "jest.config.*", "karma.conf.*",
        "mocha.opts", "phpunit.xml", "phpunit.xml.dist",
    ],
    file_extensions: &[],
    keywords: &[
        "test", "fixture", "mock", "assertion", "assert", "coverage", "integration", "unit",
        "e2e", "acceptance", "expect", "should", "describe", "it",
    ],
};

pub(crate) const WEB_DEVELOPMENT: SkillIndicator = SkillIndicator {
    packages: &[
        "django", "flask", "fastapi", "tornado", "bottle", "pyramid", "aiohttp", "sanic",
        "quart", "starlette", "express", "koa", "hapi", "nestjs", "react", "vue", "angular",
        "svelte", "solid", "next", "nuxt", "gatsby", "remix", "astro", "rails", "sinatra",
        "hanami", "laravel", "symfony", "codeigniter", "cakephp", "spring", "springboot",
        "struts", "jsf", "aspnet", "asp.net", "mvc", "gin", "echo", "fiber", "chi",
    ],
    file_patterns: &[
        "server.*", "api.*", "routes.*", "router.*", "views.*", "controller*", "middleware*",
        "index.html", "index.jsx", "index.tsx", "App.jsx", "App.tsx", "App.vue", "templates/*",
        "views/*", "static/*", "public/*", "assets/*", "package.json", "webpack.config.*",
        "vite.config.*",
    ],
    file_extensions: &[
        ".html", ".htm", ".css", ".scss", ".sass", ".less", ".jsx", ".tsx", ".vue", ".svelte",
    ],
    keywords: &[
        "api", "endpoint", "route", "view", "template", "middleware", "request", "response",
        "http", "server", "web", "frontend", "backend", "component",
    ],
};

pub(crate) const API_DEVELOPMENT: SkillIndicator = SkillIndicator {
    packages: &[
        "fastapi", "flask", "django", "rest_framework", "graphql", "graphene", "ariadne",
        "strawberry", "apispec", "swagger", "openapi", "pydantic", "marshmallow", "express",
        "apollo", "@apollo/server", "swagger-ui-express", "swagger-jsdoc", "joi", "spring-web",
        "jersey", "resteasy", "webapi", "aspnetcore", "gin", "echo", "gorilla/mux",
    ],
    file_patterns: &[
        "api.*", "api_*", "*_api.*", "apis/*", "route*", "router*", "endpoint*", "schema*",
        "schemas/*", "*_schema.*", "swagger.*", "openapi.*", "*.swagger.*", "*.openapi.*",
        "api-spec.*", "api.yml", "api.yaml", "api.json", "*.graphql", "*.gql", "schema.gql",
    ],
    file_extensions: &[".graphql", ".gql"],
    keywords: &[
        "api", "endpoint", "rest", "restful", "graphql", "request", "response",
        "authentication", "authorization", "swagger", "openapi", "schema", "validation",
    ],
};

pub(crate) const MOBILE_DEVELOPMENT: SkillIndicator = SkillIndicator {
    packages: &[
        "react-native", "expo", "flutter", "ionic", "cordova", "capacitor", "nativescript",
        "kivy", "beeware", "toga", "cocoapods", "alamofire", "rxswift", "retrofit", "room",
        "navigation", "lifecycle",
    ],
    file_patterns: &[
        "App.js", "App.jsx", "App.tsx", "main.dart", "pubspec.yaml", "Podfile", "Podfile.lock",
        "Info.plist", "AppDelegate.*", "*.xcodeproj", "*.xcworkspace", "AndroidManifest.xml",
        "build.gradle", "settings.gradle", "MainActivity.*", "app/src/*", "capacitor.config.*",
        "ionic.config.*",
    ],
    file_extensions: &[".dart", ".swift", ".kt", ".kts", ".m", ".mm", ".storyboard", ".xib"],
    keywords: &[
        "mobile", "android", "ios", "native", "app", "navigation", "screen", "activity",
        "viewcontroller", "widget", "platform",
    ],
};

pub(crate) const SECURITY: SkillIndicator = SkillIndicator {
    packages: &[
        "cryptography", "pycryptodome", "hashlib", "jwt", "pyjwt", "oauth", "authlib",
        "passlib", "bcrypt", "secrets",
    ],
    file_patterns: &["auth*", "security*", "crypto*", "authentication*", "authorization*"],
    file_extensions: &[],
    keywords: &[
        "authentication", "authorization", "encryption", "hash", "token", "password",
        "security", "crypto",
    ],
};
